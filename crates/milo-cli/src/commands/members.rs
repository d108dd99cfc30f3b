use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use milo_db::Connection;
use milo_domain::{
    Delete, Gender, Member, MemberFilter, MemberStatus, PaymentMethod, Query,
    Retrieve, Update,
};
use milo_membership::datetime;
use milo_membership::referral;
use milo_membership::registration::{NewMember, Register};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Register a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
    /// Show a member's referral code
    #[clap(name = "referral")]
    Referral(ReferralCode),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
            Members::Referral(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub status: Option<MemberStatus>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter {
            id: self.id,
            name: self.name,
            phone: self.phone,
            status: self.status,
            ..Default::default()
        };

        let members: Vec<Member> = db.query(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub phone: String,
    #[clap(long)]
    pub date_of_birth: Option<NaiveDate>,
    #[clap(short, long)]
    pub gender: Option<Gender>,
    #[clap(short, long)]
    pub address: Option<String>,
    #[clap(long)]
    pub emergency_contact_name: Option<String>,
    #[clap(long)]
    pub emergency_contact_phone: Option<String>,
    /// Plan the membership starts on
    #[clap(long)]
    pub plan: u32,
    /// Membership start, defaults to today
    #[clap(long)]
    pub start: Option<NaiveDate>,
    /// Initial membership fee collected on signup
    #[clap(long)]
    pub amount: f64,
    #[clap(short, long, default_value = "cash")]
    pub method: PaymentMethod,
    /// Id of the member who made the referral
    #[clap(long)]
    pub referred_by: Option<u32>,
    #[clap(short = 'c', long)]
    pub notes: Option<String>,
}

impl AddMember {
    /// Run the command and register a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let start = self.start.unwrap_or(datetime::today());

        // Check if a member with this phone number already exists
        let members: Vec<Member> = db
            .query(&MemberFilter {
                phone: Some(self.phone.clone()),
                ..Default::default()
            })
            .await?;
        if !members.is_empty() {
            return Err(anyhow!(
                "Member with phone {} already exists.",
                self.phone
            ));
        }

        let prompt = format!(
            "Register {} on plan {} starting {}?",
            self.name, self.plan, start
        );
        let confirm = Confirm::new(&prompt).with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = NewMember {
            full_name: self.name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            plan_id: self.plan,
            start,
            referred_by: self.referred_by,
            notes: self.notes.unwrap_or_default(),
            payment_amount: self.amount,
            payment_method: self.method,
            payment_date: datetime::today(),
        }
        .register(db)
        .await?;

        println!();
        member.print_formatted();
        println!();
        println!("Member added with id {}.", member.member_id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub address: Option<String>,
    #[clap(short, long)]
    pub status: Option<MemberStatus>,
    #[clap(short = 'c', long)]
    pub notes: Option<String>,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let mut update = member.clone();

        if let Some(name) = self.name {
            update.full_name = name;
        }
        if let Some(email) = self.email {
            update.email = Some(email);
        }
        if let Some(phone) = self.phone {
            update.phone = phone;
        }
        if let Some(address) = self.address {
            update.address = Some(address);
        }
        if let Some(status) = self.status {
            update.status = status;
        }
        if let Some(notes) = self.notes {
            update.notes = notes;
        }

        println!();
        (member, update.clone()).print_formatted();
        println!();
        let confirm = Confirm::new("Update member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        db.update(update).await?;

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteMember {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        let confirm =
            Confirm::new("Delete member from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(member).await?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ReferralCode {
    #[clap(short, long)]
    pub id: u32,
}

impl ReferralCode {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let code = referral::referral_code(&member.full_name, &member.phone);
        println!("{}", code);
        Ok(())
    }
}
