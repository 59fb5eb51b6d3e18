//! Deep-link CLI commands
//!
//! Encode and decode vehicle detail links without touching the inventory.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{DealerError, DealerResult};
use crate::link::{decode_link, extract_link_param, share_url, EncodedLink};

use super::parse_year;

/// Link subcommands
#[derive(Subcommand)]
pub enum LinkCommands {
    /// Build a link fragment from a vehicle id and its description
    Encode {
        /// Vehicle identifier
        id: String,
        /// Make (e.g. "Fiat")
        make: String,
        /// Model (e.g. "Uno")
        model: String,
        /// Model year, or "0km"
        year: String,
        /// Print the full public URL instead of the fragment
        #[arg(long)]
        url: bool,
    },
    /// Recover the vehicle id from a link fragment or shared URL
    Decode {
        /// Link fragment or full URL
        link: String,
    },
}

/// Handle a link command
pub fn handle_link_command(settings: &Settings, cmd: LinkCommands) -> DealerResult<()> {
    match cmd {
        LinkCommands::Encode {
            id,
            make,
            model,
            year,
            url,
        } => {
            let year = parse_year(&year)?;
            let link = EncodedLink::new(&id, &make, &model, year);
            if url {
                println!("{}", share_url(&settings.site_url, &link));
            } else {
                println!("{}", link);
            }
        }
        LinkCommands::Decode { link } => {
            let id = extract_link_param(&link)
                .and_then(|param| decode_link(&param))
                .ok_or_else(|| DealerError::Validation(format!("Invalid vehicle link: '{}'", link)))?;
            println!("{}", id);
        }
    }

    Ok(())
}
