use clap::{Parser, Subcommand, ValueEnum};
use spritestate::filters::FilterKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spritestate", bin_name = "spritestate", version)]
#[command(
    about = "Share sprite character builds as URL fragments",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// State directory [default: $SPRITESTATE_HOME or the platform data dir]
    #[arg(long, global = true, help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Item metadata JSON [default: <dir>/item-metadata.json]
    #[arg(long, global = true, help_heading = "Options")]
    pub catalog: Option<PathBuf>,

    /// Enabled license categories, replacing the configured set
    #[arg(long = "license", global = true, num_args = 1.., help_heading = "Filters")]
    pub licenses: Option<Vec<String>>,

    /// Enabled animations; any value turns the animation filter on
    #[arg(long = "animation", global = true, num_args = 1.., help_heading = "Filters")]
    pub animations: Option<Vec<String>>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PruneBy {
    Licenses,
    Animations,
}

impl From<PruneBy> for FilterKind {
    fn from(by: PruneBy) -> Self {
        match by {
            PruneBy::Licenses => FilterKind::License,
            PruneBy::Animations => FilterKind::Animation,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show the current build and its hash
    #[command(alias = "ls", display_order = 1)]
    Show,

    /// Print the canonical hash of the current build
    #[command(display_order = 2)]
    Encode,

    /// Replace the current build with the one in a hash
    #[command(display_order = 3)]
    Decode {
        /// Fragment, with or without the leading '#'
        hash: String,
    },

    /// Select a catalog item, replacing whatever holds its group
    #[command(alias = "s", display_order = 10)]
    Select {
        /// Catalog item id (e.g. hair_long)
        item_id: String,

        /// Variant to use [default: the item's first variant]
        #[arg(long)]
        variant: Option<String>,
    },

    /// Clear one or more selection groups
    #[command(alias = "rm", display_order = 11)]
    Deselect {
        /// Selection groups (e.g. hat hair)
        #[arg(required = true, num_args = 1..)]
        groups: Vec<String>,
    },

    /// Set the body type (male, female, teen, child, muscular, pregnant)
    #[command(display_order = 12)]
    BodyType { tag: String },

    /// Clear the build and reapply the default character
    #[command(display_order = 13)]
    Reset,

    /// Check catalog items against the enabled licenses and animations
    #[command(display_order = 20)]
    Check {
        #[arg(required = true, num_args = 1..)]
        item_ids: Vec<String>,
    },

    /// List selections that fail the current filters
    #[command(display_order = 21)]
    Incompatible,

    /// Remove selections that fail one filter
    #[command(display_order = 22)]
    Prune {
        #[arg(long, value_enum)]
        by: PruneBy,
    },

    /// Show the effective configuration
    #[command(display_order = 30)]
    Config,
}
