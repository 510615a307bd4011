use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use rand::Rng;
use sdprompt_store::Category;

use crate::console::Console;
use crate::error::AppError;

pub const SUBJECT_KINDS: [&str; 3] = ["person", "place", "thing"];
pub const QUALITY_PREFIX: &str = "(masterpiece, high quality)";

/// Everything the user picked for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptParts {
    pub subject: String,
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub rendering: Vec<String>,
    pub descriptors: Vec<String>,
    pub negatives: Vec<String>,
    pub scene: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub positive: String,
    pub negative: String,
}

impl PromptParts {
    /// Renders the positive prompt. Empty lists leave their segment empty, so
    /// separators may double up.
    pub fn positive(&self) -> String {
        let descriptors: Vec<String> = self
            .descriptors
            .iter()
            .map(|descriptor| format!("({descriptor})"))
            .collect();

        format!(
            "{QUALITY_PREFIX}, ({subject}), {genres}, by {artists}, rendered in {rendering}, {descriptors}, ({scene})",
            subject = self.subject,
            genres = self.genres.join(", "),
            artists = self.artists.join(", by "),
            rendering = self.rendering.join(", rendered in "),
            descriptors = descriptors.join(", "),
            scene = self.scene,
        )
    }

    pub fn negative(&self) -> String {
        self.negatives.join(", ")
    }

    pub fn render(&self) -> PromptPair {
        PromptPair {
            positive: self.positive(),
            negative: self.negative(),
        }
    }
}

/// Walks the user through the prompt questions in their fixed order.
///
/// `categories` comes from [`sdprompt_store::CategoryStore::load_all`]; a
/// missing category is treated as an empty list.
pub fn collect_parts<R, W, G>(
    console: &mut Console<R, W>,
    categories: &BTreeMap<Category, Vec<String>>,
    page_size: usize,
    rng: &mut G,
) -> Result<PromptParts, AppError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let subject = console
        .choose_many(
            "Is this a picture of a person, place, or thing?",
            &SUBJECT_KINDS,
            page_size,
            rng,
        )?
        .into_iter()
        .next()
        .unwrap_or_default();
    let genres = console.choose_many(
        "Choose one or more genres:",
        entries(categories, Category::Genres),
        page_size,
        rng,
    )?;
    let artists = console.choose_many(
        "Choose one or more artists:",
        entries(categories, Category::Artists),
        page_size,
        rng,
    )?;
    let rendering = console.choose_many(
        "Choose one or more rendering styles:",
        entries(categories, Category::Rendering),
        page_size,
        rng,
    )?;
    let descriptors = console.choose_many(
        "Choose descriptive terms:",
        entries(categories, Category::Descriptors),
        page_size,
        rng,
    )?;
    let negatives = entries(categories, Category::Negative).to_vec();
    let scene = console.ask("\nDescribe the scene (will be emphasized with parentheses): ")?;

    Ok(PromptParts {
        subject,
        genres,
        artists,
        rendering,
        descriptors,
        negatives,
        scene,
    })
}

fn entries(categories: &BTreeMap<Category, Vec<String>>, category: Category) -> &[String] {
    categories
        .get(&category)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
