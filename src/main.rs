//! Triage - headless damage runner
//!
//! Applies a series of hits from one damage source to a fresh player and
//! prints the resulting body model.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use triage::body::part::{EquipmentSlot, PlayerPart};
use triage::core::config::{config, set_config, DamageConfig};
use triage::core::error::{Result, TriageError};
use triage::damage::armor::{ArmorMaterial, ArmorPiece};
use triage::damage::distribution::{handle_damage_taken, DamageContext, DamageDistribution};
use triage::damage::source::DamageSource;
use triage::events::EventBus;
use triage::host::SimplePlayer;
use triage::registry::{register_defaults, DamageRegistry};

/// Apply hits to a simulated player and show where the damage landed
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(about = "Distribute damage over a multi-part player model")]
struct Args {
    /// Damage source kind, e.g. fall, magic, mob
    #[arg(long, default_value = "mob")]
    source: String,

    /// Damage per hit
    #[arg(long, default_value_t = 4.0)]
    damage: f32,

    /// Number of hits
    #[arg(long, default_value_t = 1)]
    hits: u32,

    /// Ticks simulated after each hit
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Armor material worn in every slot: leather, iron or diamond
    #[arg(long)]
    armor: Option<String>,

    /// Give the player a morphine shot before the first hit
    #[arg(long)]
    morphine: bool,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct HitResult {
    damage: f32,
    undistributed: f32,
    health_after: f32,
}

#[derive(Serialize)]
struct PartResult {
    part: PlayerPart,
    current: f32,
    max: f32,
}

#[derive(Serialize)]
struct RunResult {
    seed: u64,
    source: String,
    distribution: String,
    hits: Vec<HitResult>,
    parts: Vec<PartResult>,
    player_health: f32,
    dead: bool,
    bleeding: bool,
    effects: Vec<(String, u32, u8)>,
}

fn parse_material(name: &str) -> Result<ArmorMaterial> {
    match name.to_ascii_lowercase().as_str() {
        "leather" => Ok(ArmorMaterial::Leather),
        "iron" => Ok(ArmorMaterial::Iron),
        "diamond" => Ok(ArmorMaterial::Diamond),
        other => Err(TriageError::InvalidConfig(format!("unknown armor material: {}", other))),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("triage=info")
        .init();

    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => DamageConfig::load(path)?,
        None => DamageConfig::default(),
    };
    if set_config(loaded).is_err() {
        tracing::warn!("config was already set, keeping the existing one");
    }
    let config = config();

    let registry = DamageRegistry::new();
    register_defaults(&registry)?;
    registry.close(config);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut player = SimplePlayer::new();
    if let Some(name) = &args.armor {
        let material = parse_material(name)?;
        for slot in EquipmentSlot::ARMOR_SLOTS {
            player = player.with_armor(slot, ArmorPiece::of(material, slot));
        }
    }

    let mut model = registry.create_model(config);
    if args.morphine {
        model.apply_morphine(config.morphine_ticks);
    }

    let events = EventBus::new();
    let source = DamageSource::from_kind(&args.source);
    let distribution = registry.get_damage_distribution(&source);
    tracing::info!(
        source = %source.kind,
        distribution = %distribution.name(),
        seed,
        "starting run"
    );

    let mut hits = Vec::with_capacity(args.hits as usize);
    for _ in 0..args.hits {
        if player.kills > 0 || player.is_bleeding() {
            break;
        }
        let undistributed = {
            let mut ctx = DamageContext {
                model: &mut model,
                player: &mut player,
                events: &events,
                rng: &mut rng,
                config,
            };
            handle_damage_taken(&distribution, &mut ctx, args.damage, &source, true, true)
        };
        for _ in 0..args.ticks {
            model.tick(&mut player);
        }
        hits.push(HitResult {
            damage: args.damage,
            undistributed,
            health_after: model.current_health_sum(),
        });
    }

    let mut effects: Vec<(String, u32, u8)> = player
        .effects
        .iter()
        .map(|(effect, (duration, amplifier))| (effect.to_string(), *duration, *amplifier))
        .collect();
    effects.sort();

    let result = RunResult {
        seed,
        source: source.kind.clone(),
        distribution: distribution.name(),
        hits,
        parts: model
            .parts()
            .iter()
            .map(|part| PartResult {
                part: part.part,
                current: part.current_health(),
                max: part.max_health(),
            })
            .collect(),
        player_health: player.health,
        dead: player.kills > 0,
        bleeding: player.is_bleeding(),
        effects,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text(&result),
    }
    Ok(())
}

fn print_text(result: &RunResult) {
    println!("Damage Run");
    println!("==========");
    println!("Source: {} ({})", result.source, result.distribution);
    println!("Seed: {}", result.seed);
    for (i, hit) in result.hits.iter().enumerate() {
        println!(
            "Hit {}: {:.2} damage, {:.2} undistributed, {:.2} health left",
            i + 1,
            hit.damage,
            hit.undistributed,
            hit.health_after
        );
    }
    println!();
    for part in &result.parts {
        println!("  {:<12} {:>5.2} / {:.0}", part.part.to_string(), part.current, part.max);
    }
    println!();
    println!("Player health: {:.2}", result.player_health);
    if result.dead {
        println!("Player died");
    } else if result.bleeding {
        println!("Player is bleeding out");
    }
    for (effect, duration, amplifier) in &result.effects {
        println!("Effect {} {} for {} ticks", effect, amplifier + 1, duration);
    }
}
