use std::io::{BufRead, Write};

use sdprompt_store::{Category, CategoryStore, RestoreOutcome};
use sdprompt_utils::{parse_indices, split_entries};

use crate::console::Console;
use crate::error::AppError;

/// What the user asked to do with the entries of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Add(String),
    Remove(String),
    Skip,
}

/// Applies `action` to the in-memory entries.
pub fn apply_edit(entries: &mut Vec<String>, action: &EditAction) {
    match action {
        EditAction::Add(input) => entries.extend(split_entries(input)),
        EditAction::Remove(input) => {
            for index in parse_indices(input, entries.len()) {
                entries.remove(index);
            }
        }
        EditAction::Skip => {}
    }
}

/// Interactive add/remove/restore loop over every category.
///
/// Returns when the user picks `0`. Store failures are reported and the menu
/// is shown again.
pub fn edit_categories<R, W>(
    console: &mut Console<R, W>,
    store: &CategoryStore,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    loop {
        console.say("\n--- Edit Configuration Categories ---")?;
        for (number, category) in Category::ALL.iter().enumerate() {
            console.say(format_args!("  [{}] {category}", number + 1))?;
        }
        console.say("  [R] Restore last backup")?;
        console.say("  [0] Back to main menu")?;

        let choice = console.ask("Choose a category to edit: ")?.trim().to_lowercase();
        let outcome = match choice.as_str() {
            "0" => return Ok(()),
            "r" => restore_category(console, store),
            _ => match menu_category(&choice) {
                Some(category) => edit_category(console, store, category),
                None => console.say("Invalid option."),
            },
        };

        match outcome {
            Err(AppError::Store(error)) => {
                tracing::warn!(%error, "category edit failed");
                console.say(format_args!("Error: {error}"))?;
            }
            other => other?,
        }
    }
}

fn menu_category(choice: &str) -> Option<Category> {
    if choice.is_empty() || !choice.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let number: usize = choice.parse().ok()?;
    number
        .checked_sub(1)
        .and_then(|index| Category::ALL.get(index).copied())
}

fn restore_category<R, W>(console: &mut Console<R, W>, store: &CategoryStore) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    let target = console.ask("Which category to restore from backup? ")?;
    let Ok(category) = target.parse::<Category>() else {
        return console.say("Invalid category.");
    };

    match store.restore(category)? {
        RestoreOutcome::Restored => console.say(format_args!("Restored backup for '{category}'")),
        RestoreOutcome::NoBackup => console.say(format_args!("No backup found for '{category}'")),
    }
}

fn edit_category<R, W>(
    console: &mut Console<R, W>,
    store: &CategoryStore,
    category: Category,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    let mut entries = store.load(category)?;
    console.say(format_args!("\nCurrent entries in '{category}':"))?;
    for (number, entry) in entries.iter().enumerate() {
        console.say(format_args!("  [{}] {entry}", number + 1))?;
    }

    let action = console
        .ask("Type 'add' to add new item(s), 'remove' to delete, or Enter to skip: ")?
        .trim()
        .to_lowercase();
    let action = match action.as_str() {
        "add" => EditAction::Add(console.ask("Enter new item(s) separated by commas: ")?),
        "remove" => EditAction::Remove(
            console.ask("Enter number(s) of items to remove separated by commas: ")?,
        ),
        _ => EditAction::Skip,
    };

    apply_edit(&mut entries, &action);
    let saved = store.save(category, &entries)?;
    tracing::debug!(%category, entries = saved.entries, backed_up = saved.backed_up, "category edited");
    console.say(format_args!("Updated '{category}' saved."))
}
