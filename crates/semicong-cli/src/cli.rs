use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "semicong",
    about = "Semicong: congruences on finite transformation semigroups",
    version
)]
pub struct Cli {
    /// Log enumeration progress to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count the classes of a presentation's congruence and list the non-trivial ones
    Classes {
        /// Presentation file (.json or .toml)
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decide whether two words are related
    Contains {
        /// Presentation file (.json or .toml)
        file: String,

        /// First word, comma separated letters (e.g. `0,1,1`)
        u: String,

        /// Second word, comma separated letters
        v: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the quotient semigroup of a two-sided congruence
    Quotient {
        /// Presentation file (.json or .toml)
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe a built-in toy semigroup
    Toy {
        /// Toy name: klein_four, cyclic_3, or t5_pair
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
