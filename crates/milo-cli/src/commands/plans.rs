use anyhow::Result;
use clap::{Args, Subcommand};
use inquire::Confirm;

use milo_db::Connection;
use milo_domain::{
    Delete, Insert, MembershipPlan, PlanFilter, Query, Retrieve, Update,
};
use milo_membership::validate;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Plans {
    /// List plans
    #[clap(name = "list")]
    List(ListPlans),
    /// Add a plan
    #[clap(name = "add")]
    Add(AddPlan),
    /// Update a plan
    #[clap(name = "set")]
    Update(UpdatePlan),
    /// Make a plan available again
    #[clap(name = "enable")]
    Enable(EnablePlan),
    /// Retire a plan without touching existing members
    #[clap(name = "disable")]
    Disable(DisablePlan),
    /// Delete a plan
    #[clap(name = "delete")]
    Delete(DeletePlan),
}

impl Plans {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Plans::List(cmd) => cmd.run(db).await,
            Plans::Add(cmd) => cmd.run(db).await,
            Plans::Update(cmd) => cmd.run(db).await,
            Plans::Enable(cmd) => cmd.set_active(db, true).await,
            Plans::Disable(cmd) => cmd.set_active(db, false).await,
            Plans::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListPlans {
    /// Only plans open for new memberships
    #[clap(short, long)]
    pub active: bool,
}

impl ListPlans {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = PlanFilter {
            is_active: self.active.then_some(true),
            ..Default::default()
        };
        let plans: Vec<MembershipPlan> = db.query(&filter).await?;
        println!("{} plans.", plans.len());
        plans.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddPlan {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub price: f64,
    #[clap(short, long)]
    pub duration_days: u32,
    #[clap(short = 'c', long)]
    pub description: Option<String>,
}

impl AddPlan {
    pub async fn run(self, db: &Connection) -> Result<()> {
        validate::plan(&self.name, self.price, self.duration_days)?;

        let plan = MembershipPlan {
            name: self.name.trim().to_string(),
            price: self.price,
            duration_days: self.duration_days,
            description: self.description,
            is_active: true,
            ..Default::default()
        };

        println!();
        plan.print_formatted();
        println!();

        let confirm = Confirm::new("Add plan?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let plan = db.insert(plan).await?;
        println!("Plan added with id {}.", plan.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdatePlan {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub price: Option<f64>,
    #[clap(short, long)]
    pub duration_days: Option<u32>,
    #[clap(short = 'c', long)]
    pub description: Option<String>,
}

impl UpdatePlan {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let plan: MembershipPlan = db.retrieve(self.id).await?;
        let mut update = plan.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(price) = self.price {
            update.price = price;
        }
        if let Some(duration_days) = self.duration_days {
            update.duration_days = duration_days;
        }
        if let Some(description) = self.description {
            update.description = Some(description);
        }
        validate::plan(&update.name, update.price, update.duration_days)?;

        println!();
        update.print_formatted();
        println!();
        let confirm = Confirm::new("Update plan?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        db.update(update).await?;

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct EnablePlan {
    #[clap(short, long)]
    pub id: u32,
}

#[derive(Args, Debug)]
pub struct DisablePlan {
    #[clap(short, long)]
    pub id: u32,
}

impl EnablePlan {
    pub async fn set_active(self, db: &Connection, active: bool) -> Result<()> {
        toggle_plan(db, self.id, active).await
    }
}

impl DisablePlan {
    pub async fn set_active(self, db: &Connection, active: bool) -> Result<()> {
        toggle_plan(db, self.id, active).await
    }
}

async fn toggle_plan(db: &Connection, id: u32, active: bool) -> Result<()> {
    let mut plan: MembershipPlan = db.retrieve(id).await?;
    plan.is_active = active;
    let plan = db.update(plan).await?;
    let state = if plan.is_active { "active" } else { "inactive" };
    println!("Plan {} is now {}.", plan.name, state);
    Ok(())
}

#[derive(Args, Debug)]
pub struct DeletePlan {
    #[clap(short, long)]
    pub id: u32,
}

impl DeletePlan {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let plan: MembershipPlan = db.retrieve(self.id).await?;
        println!();
        plan.print_formatted();
        println!();
        let confirm = Confirm::new("Delete plan from database?")
            .with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(plan).await?;
        Ok(())
    }
}
