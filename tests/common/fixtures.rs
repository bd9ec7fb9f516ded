#![allow(dead_code)]

use tracking::model::Issue;
use tracking::storage::{Database, IssueRepository};

pub fn issue(title: &str) -> Issue {
    Issue::new(title, format!("{title} description"), "Open", "tester", "Medium")
}

/// "Issue 1" (Open, User1, High) and "Issue 2" (Closed, User2, Medium).
pub fn standard_issues() -> Vec<Issue> {
    vec![
        Issue::new("Issue 1", "Description 1", "Open", "User1", "High"),
        Issue::new("Issue 2", "Description 2", "Closed", "User2", "Medium"),
    ]
}

/// Insert the standard issues and return them with their assigned ids.
pub fn seed(db: &Database) -> Vec<Issue> {
    let uow = db.unit_of_work().expect("unit of work");
    let mut issues = standard_issues();
    for issue in &mut issues {
        uow.issues().add(issue).expect("seed issue");
    }
    uow.complete().expect("complete");
    issues
}
