//! Plain-text view of the directory: title, error banner, the visible page of
//! the user table, the page bar and the form's submit label.

use std::fmt::Write;

use crate::contract::error::StoreError;
use crate::contract::model::User;

const TITLE: &str = "User Management";
const HEADERS: [&str; 5] = ["ID", "First Name", "Last Name", "Email", "Department"];

/// Everything needed to draw one screen.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub visible: &'a [User],
    pub current_page: usize,
    pub total_pages: usize,
    pub last_error: Option<&'a StoreError>,
    pub submit_label: &'a str,
}

fn row(user: &User) -> [String; 5] {
    [
        user.id.to_string(),
        user.first_name().to_string(),
        user.last_name().to_string(),
        user.email.clone(),
        user.department().to_string(),
    ]
}

/// Fixed-width table of `users` with a header row.
pub fn render_table(users: &[User]) -> String {
    let rows: Vec<[String; 5]> = users.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &widths, &HEADERS);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, &widths, &separator);
    for r in &rows {
        write_row(&mut out, &widths, r);
    }
    out
}

fn write_row<S: AsRef<str>>(out: &mut String, widths: &[usize], cells: &[S]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c.as_ref(), width = *w))
        .collect();
    let _ = writeln!(out, "| {} |", padded.join(" | "));
}

/// Page numbers `1..=total` with the current one bracketed, e.g. `1 [2] 3`.
/// Empty when there are no pages.
pub fn render_pagination(current_page: usize, total_pages: usize) -> String {
    (1..=total_pages)
        .map(|p| {
            if p == current_page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_screen(screen: &Screen<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    if let Some(err) = screen.last_error {
        let _ = writeln!(out, "!! {}", err);
    }
    out.push_str(&render_table(screen.visible));
    let pages = render_pagination(screen.current_page, screen.total_pages);
    if !pages.is_empty() {
        let _ = writeln!(out, "Pages: {}", pages);
    }
    let _ = writeln!(out, "Form: {}", screen.submit_label);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{Company, UserId};

    fn user(id: u64, name: &str) -> User {
        User {
            id: UserId::Number(id),
            name: name.into(),
            email: format!("{}@example.com", id),
            company: Company {
                name: "Dept".into(),
            },
        }
    }

    #[test]
    fn table_splits_name_into_columns() {
        let out = render_table(&[user(1, "Leanne Graham"), user(2, "Cher")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("First Name"));
        assert!(lines[2].contains("| Leanne"));
        assert!(lines[2].contains("| Graham"));
        assert!(lines[3].contains("| Cher"));
        // all rows share the same width
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn pagination_marks_active_page() {
        assert_eq!(render_pagination(2, 3), "1 [2] 3");
        assert_eq!(render_pagination(1, 0), "");
        assert_eq!(render_pagination(9, 2), "1 2");
    }

    #[test]
    fn screen_shows_error_banner_and_label() {
        let err = StoreError::AddFailed;
        let users = [user(1, "A B")];
        let out = render_screen(&Screen {
            visible: &users,
            current_page: 1,
            total_pages: 1,
            last_error: Some(&err),
            submit_label: "Add User",
        });
        assert!(out.starts_with("User Management\n"));
        assert!(out.contains("!! Failed to add user. Please try again."));
        assert!(out.contains("Pages: [1]"));
        assert!(out.ends_with("Form: Add User\n"));
    }
}
