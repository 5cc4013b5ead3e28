//! Audience management command handlers.

use std::path::PathBuf;

use audiencelab_core::{AppConfig, Audience, AudienceFields};
use audiencelab_store::{AudienceStore, BlobStore};
use clap::Subcommand;

/// Sub-commands available under `audiences`.
#[derive(Debug, Subcommand)]
pub enum AudiencesCommands {
    /// List saved audiences, newest first
    List {
        /// Only show audiences whose name contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Show every field of one audience
    Show { id: String },
    /// Save a new audience
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        demographics: String,
        #[arg(long, default_value = "")]
        interests: String,
        #[arg(long, default_value = "")]
        behaviors: String,
    },
    /// Edit an audience; omitted flags keep their current value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        demographics: Option<String>,
        #[arg(long)]
        interests: Option<String>,
        #[arg(long)]
        behaviors: Option<String>,
    },
    /// Delete an audience
    Delete { id: String },
    /// Create audiences from a YAML seed file, skipping names already saved
    Seed {
        /// Seed file path (defaults to `AUDIENCELAB_SEED_PATH`)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Replacement values for an update. `None` keeps the current value.
#[derive(Debug, Default)]
pub(crate) struct FieldChanges {
    pub name: Option<String>,
    pub demographics: Option<String>,
    pub interests: Option<String>,
    pub behaviors: Option<String>,
}

impl FieldChanges {
    pub(crate) fn apply(self, current: AudienceFields) -> AudienceFields {
        AudienceFields {
            name: self.name.unwrap_or(current.name),
            demographics: self.demographics.unwrap_or(current.demographics),
            interests: self.interests.unwrap_or(current.interests),
            behaviors: self.behaviors.unwrap_or(current.behaviors),
        }
    }
}

/// Dispatch an `audiences` sub-command.
///
/// # Errors
///
/// Returns an error if an id is unknown, the fields fail validation, the
/// seed file cannot be loaded or the store cannot be written.
pub(crate) fn run_audiences<B: BlobStore>(
    store: &AudienceStore<B>,
    config: &AppConfig,
    command: AudiencesCommands,
) -> anyhow::Result<()> {
    match command {
        AudiencesCommands::List { search } => {
            let audiences = match search.as_deref() {
                Some(term) => store.search(term),
                None => store.list(),
            };
            print_audience_table(&audiences);
        }
        AudiencesCommands::Show { id } => {
            let audience = find_audience(store, &id)?;
            print_audience(&audience);
        }
        AudiencesCommands::Create {
            name,
            demographics,
            interests,
            behaviors,
        } => {
            let audience = store.create(AudienceFields {
                name,
                demographics,
                interests,
                behaviors,
            })?;
            println!("created audience '{}' ({})", audience.name, audience.id);
        }
        AudiencesCommands::Update {
            id,
            name,
            demographics,
            interests,
            behaviors,
        } => {
            let current = find_audience(store, &id)?;
            let changes = FieldChanges {
                name,
                demographics,
                interests,
                behaviors,
            };
            let updated = store.update(&id, changes.apply(current.fields()))?;
            println!("updated audience '{}' ({})", updated.name, updated.id);
        }
        AudiencesCommands::Delete { id } => {
            let existing = store.get(&id);
            store.delete(&id)?;
            match existing {
                Some(audience) => println!("deleted audience '{}' ({id})", audience.name),
                None => println!("no audience with id {id}; nothing deleted"),
            }
        }
        AudiencesCommands::Seed { file } => {
            let path = file.unwrap_or_else(|| config.seed_path.clone());
            let seed = audiencelab_core::load_seed_file(&path)?;
            let created = store.seed(&seed.audiences)?;
            println!(
                "seeded {created} audiences from {} ({} already present)",
                path.display(),
                seed.audiences.len() - created
            );
        }
    }
    Ok(())
}

/// Look up an audience by id, failing with a hint when it does not exist.
///
/// # Errors
///
/// Returns an error if no audience has the given id.
pub(crate) fn find_audience<B: BlobStore>(
    store: &AudienceStore<B>,
    id: &str,
) -> anyhow::Result<Audience> {
    store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("audience '{id}' not found; run `audiences list` to see saved ids"))
}

fn print_audience_table(audiences: &[Audience]) {
    if audiences.is_empty() {
        println!("no audiences saved; run `audiences create` or `audiences seed` first");
        return;
    }

    println!("{:<38}{:<32}CREATED", "ID", "NAME");
    for audience in audiences {
        let name = if audience.name.chars().count() > 30 {
            format!("{}...", audience.name.chars().take(27).collect::<String>())
        } else {
            audience.name.clone()
        };
        println!(
            "{:<38}{:<32}{}",
            audience.id,
            name,
            audience.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_audience(audience: &Audience) {
    println!("{}", audience.name);
    println!("  id:           {}", audience.id);
    println!("  demographics: {}", dash_if_empty(&audience.demographics));
    println!("  interests:    {}", dash_if_empty(&audience.interests));
    println!("  behaviors:    {}", dash_if_empty(&audience.behaviors));
    println!("  owner:        {}", audience.owner);
    println!("  created:      {}", audience.created_at.to_rfc3339());
    println!("  updated:      {}", audience.updated_at.to_rfc3339());
}

fn dash_if_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        "\u{2014}"
    } else {
        value
    }
}
