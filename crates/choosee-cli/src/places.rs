//! Place search and reverse geocoding, the lookups behind the location step.

use choosee_client::PlacesClient;
use choosee_core::{AppConfig, Coords, PlaceSuggestion};
use clap::Subcommand;

/// Sub-commands available under `places`.
#[derive(Debug, Subcommand)]
pub enum PlacesCommands {
    /// Search places by name or address
    Search {
        /// Free-text query, e.g. "IT Park Cebu"
        query: String,
    },
    /// Describe the place at a coordinate
    Reverse {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
}

pub(crate) async fn run_places(config: &AppConfig, command: PlacesCommands) -> anyhow::Result<()> {
    let places = PlacesClient::new(config)?;
    match command {
        PlacesCommands::Search { query } => {
            let results = places.search_text(&query).await?;
            if results.is_empty() {
                println!("no places found for '{}'", query.trim());
                return Ok(());
            }
            print_suggestions(&results);
        }
        PlacesCommands::Reverse { lat, lng } => {
            let coords = Coords::new(lat, lng);
            if !coords.is_valid() {
                anyhow::bail!("coordinates out of range: {coords}");
            }
            match places.reverse_geocode(coords).await? {
                Some(place) => print_suggestions(std::slice::from_ref(&place)),
                None => println!("nothing found at {coords}"),
            }
        }
    }
    Ok(())
}

pub(crate) fn print_suggestions(results: &[PlaceSuggestion]) {
    for (i, place) in results.iter().enumerate() {
        println!("{:>2}. {}", i + 1, place.main_text);
        if !place.secondary_text.is_empty() {
            println!("    {}", place.secondary_text);
        }
        println!("    {}", place.coords);
    }
}
