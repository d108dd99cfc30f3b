use milo_domain::{Expense, Member, MembershipPlan};
use milo_membership::datetime;
use milo_reports::DashboardStats;

macro_rules! next_attr {
    ($old:ident, $new:ident) => {
        if $old != $new {
            format!(" -> {}", $new)
        } else {
            "".to_string()
        }
    };
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

fn opt(value: &Option<String>) -> String {
    match value {
        Some(value) => value.clone(),
        None => "None".to_string(),
    }
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Member ID:\t\t{}", self.member_id);
        println!("Name:\t\t\t{}", self.full_name);
        println!("Email:\t\t\t{}", opt(&self.email));
        println!("Phone:\t\t\t{}", self.phone);
        let plan = match self.plan_id {
            Some(id) => id.to_string(),
            None => "None".to_string(),
        };
        println!("Plan:\t\t\t{}", plan);
        println!("Start:\t\t\t{}", self.membership_start);
        println!("Expiry:\t\t\t{}", self.membership_expiry);
        println!("Status:\t\t\t{}", self.status);
        println!("Notes:\t\t\t{}", self.notes);
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let email_old = opt(&old.email);
        let email_new = opt(&new.email);

        let next_name = next_attr!(old, new, full_name);
        println!("Name:\t\t\t{}{}", old.full_name, next_name);
        let next_email = next_attr!(email_old, email_new);
        println!("Email:\t\t\t{}{}", email_old, next_email);
        let next_phone = next_attr!(old, new, phone);
        println!("Phone:\t\t\t{}{}", old.phone, next_phone);
        let next_start = next_attr!(old, new, membership_start);
        println!("Start:\t\t\t{}{}", old.membership_start, next_start);
        let next_expiry = next_attr!(old, new, membership_expiry);
        println!("Expiry:\t\t\t{}{}", old.membership_expiry, next_expiry);
        let next_status = next_attr!(old, new, status);
        println!("Status:\t\t\t{}{}", old.status, next_status);
        let next_notes = next_attr!(old, new, notes);
        println!("Notes:\t\t\t{}{}", old.notes, next_notes);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        let today = datetime::today();
        println!(
            "{:>4}\t{:<8}\t{:<24}\t{:<30}\t{:<12}\t{:<10}\t{:<10}\t{:<8}\t{}",
            "ID",
            "MemberID",
            "Name",
            "Email",
            "Phone",
            "Start",
            "Expiry",
            "Status",
            "Expired"
        );
        println!("{:-<180}", "-");

        for member in self {
            let expired = if member.is_expired(today) { "*" } else { "" };
            println!(
                "{:>4}\t{:<8}\t{:<24}\t{:<30}\t{:<12}\t{:<10}\t{:<10}\t{:<8}\t{}",
                member.id,
                member.member_id,
                member.full_name,
                opt(&member.email),
                member.phone,
                member.membership_start.to_string(),
                member.membership_expiry.to_string(),
                member.status.to_string(),
                expired
            );
        }
    }
}

impl PrintFormatted for MembershipPlan {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.name);
        println!("Duration (days):\t{}", self.duration_days);
        println!("Price:\t\t\t{:.2}", self.price);
        println!("Description:\t\t{}", opt(&self.description));
        println!("Active:\t\t\t{}", self.is_active);
    }
}

impl PrintFormatted for Vec<MembershipPlan> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:>8}\t{:>10}\t{:<8}\t{}",
            "ID", "Name", "Days", "Price", "Active", "Description"
        );
        println!("{:-<120}", "-");
        for plan in self {
            let active = if plan.is_active { "yes" } else { "no" };
            println!(
                "{:>4}\t{:<24}\t{:>8}\t{:>10.2}\t{:<8}\t{}",
                plan.id,
                plan.name,
                plan.duration_days,
                plan.price,
                active,
                opt(&plan.description)
            );
        }
    }
}

impl PrintFormatted for Vec<Expense> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<12}\t{:<12}\t{:>12}\t{}",
            "ID", "Date", "Category", "Amount", "Description"
        );
        println!("{:-<120}", "-");
        for expense in self {
            println!(
                "{:>4}\t{:<12}\t{:<12}\t{:>12.2}\t{}",
                expense.id,
                expense.expense_date.to_string(),
                expense.category.to_string(),
                expense.amount,
                expense.description
            );
        }
    }
}

impl PrintFormatted for DashboardStats {
    fn print_formatted(&self) {
        println!("Total members:\t\t{}", self.total_members);
        println!("Active members:\t\t{}", self.active_members);
        println!("Expired members:\t{}", self.expired_members);
        println!("Today's revenue:\t{:.2}", self.today_revenue);
        println!("Today's payments:\t{}", self.today_payments);
        println!("Today's check-ins:\t{}", self.today_check_ins);
        println!("Expiring this week:\t{}", self.expiring_this_week);
    }
}
