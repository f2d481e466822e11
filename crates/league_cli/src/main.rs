//! League CLI
//!
//! Command-line frontend over the simulation core. `play` runs a fresh
//! season in memory as a demo; every other command operates on the JSON
//! store at `--db`, so state survives between invocations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use league_core::api;
use league_core::store::MemoryStore;
use league_core::{JsonFileStore, LeagueService, LeagueStore, Match, StandingsEntry};

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Simulate a four-team double round-robin league", long_about = None)]
struct Cli {
    /// League state file
    #[arg(long, default_value = "league.json")]
    db: PathBuf,

    /// Simulation seed; the same seed replays the same season
    #[arg(long, default_value = "42")]
    seed: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a complete fresh season in memory, week by week
    Play,

    /// Simulate the next week
    Advance,

    /// Simulate every remaining week
    PlayAll,

    /// Show the current standings
    Table,

    /// List matches
    Matches {
        /// Only this week's matches
        #[arg(long)]
        week: Option<u32>,
    },

    /// Replace the result of an already played match
    Correct {
        match_id: u32,
        home_score: i64,
        away_score: i64,
    },

    /// Show title chances per team
    Predict,
}

fn main() -> Result<()> {
    env_logger::init();
    let Cli { db, seed, command } = Cli::parse();

    match command {
        Commands::Play => run_demo_season(seed),
        Commands::Advance => {
            let service = open(&db, seed)?;
            let standings = service.advance_week()?;
            println!("Week {} played.\n", service.current_week());
            print_matches(&service.matches_for(Some(service.current_week())), &service);
            println!();
            print_table(&standings);
            Ok(())
        }
        Commands::PlayAll => {
            let service = open(&db, seed)?;
            let standings = service.advance_to_completion()?;
            println!("Season complete after week {}.\n", service.current_week());
            print_table(&standings);
            println!("\nChampion: {}", standings[0].team_name);
            Ok(())
        }
        Commands::Table => {
            let service = open(&db, seed)?;
            println!("Standings after week {}:\n", service.current_week());
            print_table(&service.current_standings());
            Ok(())
        }
        Commands::Matches { week } => {
            let service = open(&db, seed)?;
            print_matches(&service.matches_for(week), &service);
            Ok(())
        }
        Commands::Correct {
            match_id,
            home_score,
            away_score,
        } => {
            // Same score bound as the JSON boundary.
            let home = api::validate_score(home_score)?;
            let away = api::validate_score(away_score)?;
            let service = open(&db, seed)?;
            let standings = service.correct_result(match_id, home, away)?;
            println!("Match {} corrected to {}-{}.\n", match_id, home_score, away_score);
            print_table(&standings);
            Ok(())
        }
        Commands::Predict => {
            let service = open(&db, seed)?;
            print_predictions(&service);
            Ok(())
        }
    }
}

fn open(db: &Path, seed: u64) -> Result<LeagueService<JsonFileStore>> {
    let store = JsonFileStore::open(db)?;
    Ok(LeagueService::load(store, seed)?)
}

/// Full-season playthrough: simulate each week, show its results and the
/// table, and from week 4 the title chances as well.
fn run_demo_season(seed: u64) -> Result<()> {
    let service = LeagueService::load(MemoryStore::new(), seed)?;

    while !service.season_complete() {
        let standings = service.advance_week()?;
        let week = service.current_week();

        println!("=== Week {} ===", week);
        print_matches(&service.matches_for(Some(week)), &service);
        println!();
        print_table(&standings);

        if week >= 4 {
            println!();
            print_predictions(&service);
        }
        println!();
    }

    println!("Champion: {}", service.current_standings()[0].team_name);
    Ok(())
}

fn print_table(standings: &[StandingsEntry]) {
    println!(
        "{:<3} {:<18} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>4}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for e in standings {
        println!(
            "{:<3} {:<18} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>4}",
            e.position,
            e.team_name,
            e.played,
            e.wins,
            e.draws,
            e.losses,
            e.goals_for,
            e.goals_against,
            e.goal_difference,
            e.points
        );
    }
}

fn print_matches<S: LeagueStore>(matches: &[Match], service: &LeagueService<S>) {
    let name = |id: u32| {
        service
            .team_name(id)
            .unwrap_or_else(|| format!("team {}", id))
    };
    for m in matches {
        if m.played {
            println!(
                "[{:>2}] week {}: {} {} - {} {}",
                m.id,
                m.week,
                name(m.home_id),
                m.home_score,
                m.away_score,
                name(m.away_id)
            );
        } else {
            println!(
                "[{:>2}] week {}: {} vs {}",
                m.id,
                m.week,
                name(m.home_id),
                name(m.away_id)
            );
        }
    }
}

fn print_predictions<S: LeagueStore>(service: &LeagueService<S>) {
    println!("Title chances:");
    for (team, chance) in service.predict_outcome() {
        println!("  {:<18} {:>5.1}%", team, chance);
    }
}
