//! Interactive line shell over the users directory.
//!
//! The screen is redrawn whenever the store announces a state change, and on
//! page selection (pagination is view-local and never goes through the store).

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};
use users_directory::domain::events::StoreEvent;
use users_directory::domain::form::{FormField, UserFormController};
use users_directory::domain::pagination::PaginationView;
use users_directory::model::UserId;
use users_directory::UsersDirectory;

const HELP: &str = "\
Commands:
  list                 redraw the current page
  page <n>             show page n
  reload               fetch the user list again
  edit <id>            load a user into the form
  set <field> <value>  set a form field (firstName, lastName, email, department)
  submit               add or update from the form
  cancel               abandon the current edit
  delete <id>          delete a user
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Page(usize),
    Reload,
    Edit(UserId),
    Set(FormField, String),
    Submit,
    Cancel,
    Delete(UserId),
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let need_id = |what: &str| -> Result<UserId, String> {
        if rest.is_empty() {
            return Err(format!("usage: {} <id>", what));
        }
        rest.parse::<UserId>().map_err(|e| e.to_string())
    };

    let cmd = match word {
        "list" | "ls" => Command::List,
        "page" => Command::Page(
            rest.parse::<usize>()
                .map_err(|_| "usage: page <n>".to_string())?,
        ),
        "reload" => Command::Reload,
        "edit" => Command::Edit(need_id("edit")?),
        "delete" | "rm" => Command::Delete(need_id("delete")?),
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = field.parse::<FormField>().map_err(|e| e.to_string())?;
            Command::Set(field, value.to_string())
        }
        "submit" => Command::Submit,
        "cancel" => Command::Cancel,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(cmd))
}

struct Shell {
    directory: UsersDirectory,
    pagination: PaginationView,
    form: UserFormController,
    events: broadcast::Receiver<StoreEvent>,
}

impl Shell {
    fn new(directory: UsersDirectory) -> Self {
        let pagination = directory.pagination();
        let form = directory.form();
        let events = directory.subscribe();
        Self {
            directory,
            pagination,
            form,
            events,
        }
    }

    fn draw(&self) {
        println!("{}", self.directory.render(&self.pagination, &self.form));
    }

    /// Redraw once if the store reported any change since the last check.
    fn redraw_on_change(&mut self) {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    tracing::debug!(?event, "State changed");
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Missed state notifications");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.draw();
        }
    }

    /// Returns false when the shell should exit.
    async fn execute(&mut self, cmd: Command) -> bool {
        let store = self.directory.store();
        match cmd {
            Command::List => self.draw(),
            Command::Page(n) => {
                self.pagination.select_page(n);
                self.draw();
            }
            Command::Reload => {
                // Failure is recorded in the store and shown in the banner.
                let _ = store.load().await;
            }
            Command::Edit(id) => match store.find(&id) {
                Some(user) => {
                    self.form.begin_edit(&user);
                    println!("{:?}", self.form.fields());
                }
                None => println!("No user with id {}", id),
            },
            Command::Set(field, value) => {
                self.form.on_field_change(field, value);
                println!("{:?}", self.form.fields());
            }
            Command::Submit => {
                let submission = self.form.submit();
                let _ = store.submit(submission).await;
            }
            Command::Cancel => self.form.cancel_edit(),
            Command::Delete(id) => {
                let _ = store.remove(id).await;
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return false,
        }
        true
    }
}

pub async fn run(directory: UsersDirectory) -> Result<()> {
    let mut shell = Shell::new(directory);

    // Initial fetch; the resulting notification triggers the first draw.
    let _ = shell.directory.store().load().await;
    shell.redraw_on_change();
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line) {
            Ok(Some(cmd)) => {
                if !shell.execute(cmd).await {
                    break;
                }
                shell.redraw_on_change();
            }
            Ok(None) => {}
            Err(msg) => println!("{}", msg),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse("page 3"), Ok(Some(Command::Page(3))));
        assert_eq!(
            parse("  delete 7 "),
            Ok(Some(Command::Delete(UserId::Number(7))))
        );
        assert_eq!(
            parse("edit abc"),
            Ok(Some(Command::Edit(UserId::Text("abc".into()))))
        );
        assert_eq!(
            parse("set department Research and Development"),
            Ok(Some(Command::Set(
                FormField::Department,
                "Research and Development".into()
            )))
        );
        assert_eq!(
            parse("set lastName"),
            Ok(Some(Command::Set(FormField::LastName, String::new())))
        );
        assert_eq!(parse("cancel"), Ok(Some(Command::Cancel)));
        assert_eq!(parse("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse("page x").is_err());
        assert!(parse("delete").is_err());
        assert!(parse("set phone 123").is_err());
        assert!(parse("frobnicate").is_err());
    }
}
