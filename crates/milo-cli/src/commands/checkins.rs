use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};

use milo_db::Connection;
use milo_domain::{
    CheckIn, CheckInFilter, EntryMethod, Insert, Member, MemberFilter, Query,
    Retrieve,
};
use milo_membership::attendance::CheckOut;
use milo_membership::datetime;

#[derive(Subcommand, Debug)]
pub enum CheckIns {
    /// Check a member in
    #[clap(name = "in")]
    In(CheckInMember),
    /// Close an open visit
    #[clap(name = "out")]
    Out(CheckOutMember),
    /// List visits
    #[clap(name = "list")]
    List(ListCheckIns),
}

impl CheckIns {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            CheckIns::In(cmd) => cmd.run(db).await,
            CheckIns::Out(cmd) => cmd.run(db).await,
            CheckIns::List(cmd) => cmd.run(db).await,
        }
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[derive(Args, Debug)]
pub struct CheckInMember {
    /// Member row id
    #[clap(short, long)]
    pub id: Option<u32>,
    /// Business identifier, e.g. GYM001
    #[clap(short, long)]
    pub member: Option<String>,
    #[clap(short = 'e', long, default_value = "manual")]
    pub entry_method: EntryMethod,
    #[clap(short = 'c', long)]
    pub notes: Option<String>,
}

impl CheckInMember {
    /// Run the command and log a visit
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member = resolve_member(db, self.id, self.member).await?;

        if member.is_expired(datetime::today()) {
            println!(
                "Note: membership of {} expired on {}.",
                member.full_name, member.membership_expiry
            );
        }

        let check_in = CheckIn {
            member_id: member.id,
            check_in_time: now(),
            entry_method: self.entry_method,
            notes: self.notes,
            ..Default::default()
        };
        let check_in = db.insert(check_in).await?;
        println!(
            "{} checked in at {} (visit {}).",
            member.full_name, check_in.check_in_time, check_in.id
        );

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CheckOutMember {
    /// Visit id
    #[clap(short, long)]
    pub id: u32,
}

impl CheckOutMember {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let check_in: CheckIn = db.retrieve(self.id).await?;
        let check_in = check_in.check_out(db, now()).await?;

        let duration = check_in
            .duration()
            .map(|d| format!("{} minutes", d.num_minutes()))
            .unwrap_or_default();
        println!("Visit {} closed after {}.", check_in.id, duration);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListCheckIns {
    #[clap(long)]
    pub member_id: Option<u32>,
    /// Calendar day, defaults to today
    #[clap(short, long)]
    pub day: Option<NaiveDate>,
    /// All days, not just one
    #[clap(long)]
    pub all: bool,
    /// Only members who have not checked out yet
    #[clap(short, long)]
    pub open: bool,
}

impl ListCheckIns {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let day = if self.all {
            None
        } else {
            Some(self.day.unwrap_or(datetime::today()))
        };
        let filter = CheckInFilter {
            member_id: self.member_id,
            day,
            open_only: self.open,
            ..Default::default()
        };

        let check_ins: Vec<CheckIn> = db.query(&filter).await?;
        println!(
            "{:>4}\t{:<24}\t{:<20}\t{:<20}\t{}",
            "ID", "Member", "Check-in", "Check-out", "Entry"
        );
        println!("{:-<120}", "-");
        for check_in in check_ins {
            let member: Member = db.retrieve(check_in.member_id).await?;
            let check_out = match check_in.check_out_time {
                Some(out) => out.to_string(),
                None => "still in".to_string(),
            };
            println!(
                "{:>4}\t{:<24}\t{:<20}\t{:<20}\t{}",
                check_in.id,
                member.full_name,
                check_in.check_in_time.to_string(),
                check_out,
                check_in.entry_method
            );
        }

        Ok(())
    }
}

/// Find a member either by row id or business identifier.
async fn resolve_member(
    db: &Connection,
    id: Option<u32>,
    member_id: Option<String>,
) -> Result<Member> {
    if let Some(id) = id {
        let member: Member = db.retrieve(id).await?;
        return Ok(member);
    }
    if let Some(member_id) = member_id {
        let members: Vec<Member> = db
            .query(&MemberFilter {
                member_id: Some(member_id),
                ..Default::default()
            })
            .await?;
        return members.into_iter().next().ok_or(anyhow!("member not found"));
    }
    Err(anyhow!("either --id or --member is required"))
}
