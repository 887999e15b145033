use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, Level};

use crate::bounty::BountyConversion;
use crate::config::{ChipValueBasis, SessionConfig};
use crate::display::{
    bounty_table, equity_table, print_error, print_section, report_view, sizing_table, spr_table,
    styled_call_advice, token_table,
};
use crate::error::{KoError, KoResult};
use crate::geometric::{geometric_sizing, GeometricSizing, MAX_STREETS};
use crate::odds::{
    all_in_required_equity_with, call_ev, effective_stack, required_equity_with, CallAdvice,
};
use crate::report::{HandReport, HandState};
use crate::spr::spr_and_band_with;
use crate::tokens::{lookup_tier, token_value};
use crate::units::Amount;

#[derive(Parser)]
#[command(
    name = "spaceko",
    version = "1.0.0",
    about = "Space KO bounty toolkit: bounty conversion, pot odds, SPR and geometric sizing."
)]
struct Cli {
    /// JSON file with tournament, rules and thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Tournament buy-in (currency)
    #[arg(long, global = true)]
    buy_in: Option<f64>,
    /// Starting stack in chips
    #[arg(long, global = true)]
    starting_stack: Option<f64>,
    /// Share of a token paid out immediately (0-1)
    #[arg(long, global = true)]
    cash_share: Option<f64>,
    /// Value chips from this share of the buy-in instead of the full buy-in
    #[arg(long, global = true)]
    prize_pool_fraction: Option<f64>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a villain's token value into big blinds
    Bounty {
        /// Current big blind in chips
        big_blind: f64,
        /// Token average value (currency)
        token: Option<f64>,
        /// Estimate the token value from its tier instead
        #[arg(long, conflicts_with = "token")]
        tier: Option<u32>,
    },
    /// Required equity to call, with and without the bounty
    Odds {
        /// Pot before calling, including the bet faced (BB)
        pot: f64,
        /// Amount to call (BB)
        call: f64,
        /// Bounty already expressed in BB
        #[arg(short, long)]
        bounty: Option<f64>,
        /// Current big blind, to convert --token
        #[arg(long, requires = "token")]
        big_blind: Option<f64>,
        /// Token average value (currency)
        #[arg(long, requires = "big_blind", conflicts_with = "bounty")]
        token: Option<f64>,
        /// The bet faced is a shove not yet in the pot
        #[arg(long)]
        shove: bool,
        /// Your equity (0-1) to calculate EV
        #[arg(short, long)]
        equity: Option<f64>,
    },
    /// Analyze stack-to-pot ratio
    Spr {
        /// Effective stack (BB)
        stack: f64,
        /// Pot on the flop (BB)
        pot: f64,
    },
    /// Geometric bet sizes to get all-in by a target street
    Geo {
        /// Effective stack (BB)
        stack: f64,
        /// Pot on the flop (BB)
        pot: f64,
        /// Number of betting streets (2 = turn, 3 = river)
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_values_t = vec![2, 3],
            value_parser = clap::value_parser!(u32).range(1..=MAX_STREETS as i64)
        )]
        streets: Vec<u32>,
    },
    /// Expected token values by tier
    Token {
        /// Single tier to look up
        tier: Option<u32>,
    },
    /// Full report for one hand
    Analyze {
        /// Current big blind in chips
        #[arg(long = "big-blind", default_value = "200")]
        big_blind: f64,
        /// Token average value (currency)
        #[arg(long, default_value = "5")]
        token: f64,
        /// Estimate the token value from its tier instead
        #[arg(long)]
        tier: Option<u32>,
        /// Pot before calling, including the bet faced
        #[arg(long, default_value = "10")]
        pot: f64,
        /// Amount to call
        #[arg(long, default_value = "5")]
        call: f64,
        /// Pot on the flop
        #[arg(long = "flop-pot", default_value = "6")]
        flop_pot: f64,
        /// Effective stack behind on the flop
        #[arg(long, default_value = "100")]
        stack: f64,
        /// Hero stack behind; with --villain, replaces --stack by the shorter one
        #[arg(long, requires = "villain", conflicts_with = "stack")]
        hero: Option<f64>,
        /// Villain stack behind
        #[arg(long, requires = "hero")]
        villain: Option<f64>,
        /// Pot, call and stack are given in chips instead of BB
        #[arg(long)]
        chips: bool,
        /// The bet faced is a shove not yet in the pot
        #[arg(long)]
        shove: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive hand-by-hand session
    Session,
}

pub fn run() {
    let cli = Cli::parse();
    execute(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    execute(cli);
}

fn execute(cli: Cli) {
    init_logging(cli.verbose);
    let result = build_config(&cli).and_then(|config| dispatch(cli.command, &config));
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when run_with_args is called twice.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> KoResult<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(buy_in) = cli.buy_in {
        config.tournament.buy_in = buy_in;
    }
    if let Some(stack) = cli.starting_stack {
        config.tournament.starting_stack = stack;
    }
    if let Some(share) = cli.cash_share {
        config.rules.cash_share = share;
    }
    if let Some(fraction) = cli.prize_pool_fraction {
        config.rules.chip_value_basis = ChipValueBasis::PrizePool { fraction };
    }
    config.validate()?;
    debug!(?config, "session config ready");
    Ok(config)
}

fn resolve_token(config: &SessionConfig, token: Option<f64>, tier: Option<u32>) -> KoResult<f64> {
    match (token, tier) {
        (_, Some(t)) => token_value(t, config.tournament.buy_in),
        (Some(v), None) => non_negative_input("Token value", v),
        (None, None) => Err(KoError::InvalidValue(
            "Give a token value or --tier".to_string(),
        )),
    }
}

fn non_negative_input(name: &str, value: f64) -> KoResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(KoError::InvalidValue(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

fn dispatch(command: Commands, config: &SessionConfig) -> KoResult<()> {
    match command {
        Commands::Bounty {
            big_blind,
            token,
            tier,
        } => cmd_bounty(config, big_blind, token, tier),
        Commands::Odds {
            pot,
            call,
            bounty,
            big_blind,
            token,
            shove,
            equity,
        } => cmd_odds(config, pot, call, bounty, big_blind, token, shove, equity),
        Commands::Spr { stack, pot } => cmd_spr(config, stack, pot),
        Commands::Geo {
            stack,
            pot,
            streets,
        } => cmd_geo(stack, pot, &streets),
        Commands::Token { tier } => cmd_token(config, tier),
        Commands::Analyze {
            big_blind,
            token,
            tier,
            pot,
            call,
            flop_pot,
            stack,
            hero,
            villain,
            chips,
            shove,
            json,
        } => {
            let stack = match (hero, villain) {
                (Some(h), Some(v)) => effective_stack(
                    non_negative_input("Hero stack", h)?,
                    non_negative_input("Villain stack", v)?,
                ),
                _ => stack,
            };
            let opponent_token_value = resolve_token(config, Some(token), tier)?;
            let amount: fn(f64) -> Amount = if chips { Amount::chips } else { Amount::bb };
            let hand = HandState {
                current_big_blind: non_negative_input("Big blind", big_blind)?,
                opponent_token_value,
                pot_before_bet: amount(non_negative_input("Pot", pot)?),
                amount_to_call: amount(non_negative_input("Call", call)?),
                pot_on_flop: amount(non_negative_input("Flop pot", flop_pot)?),
                effective_stack: amount(non_negative_input("Stack", stack)?),
                facing_shove: shove,
            };
            cmd_analyze(config, &hand, json)
        }
        Commands::Session => {
            crate::session::session_command(config);
            Ok(())
        }
    }
}

fn cmd_bounty(
    config: &SessionConfig,
    big_blind: f64,
    token: Option<f64>,
    tier: Option<u32>,
) -> KoResult<()> {
    let big_blind = non_negative_input("Big blind", big_blind)?;
    let value = resolve_token(config, token, tier)?;
    let conversion = BountyConversion::compute(config, big_blind, value);

    println!();
    if let Some(t) = tier {
        println!("  {}", lookup_tier(t)?.to_string().bold());
    }
    println!("{}", bounty_table(&conversion));
    println!("\n  {}", conversion.impact.guidance());
    println!(
        "  Add {} to the pot when working out calling odds.",
        format!("{:.2} BB", conversion.bounty_bb).bold()
    );
    println!();
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_odds(
    config: &SessionConfig,
    pot: f64,
    call: f64,
    bounty: Option<f64>,
    big_blind: Option<f64>,
    token: Option<f64>,
    shove: bool,
    equity: Option<f64>,
) -> KoResult<()> {
    let pot = non_negative_input("Pot", pot)?;
    let call = non_negative_input("Call", call)?;
    let bounty_bb = odds_bounty(config, bounty, big_blind, token)?;

    let th = &config.thresholds;
    let req = if shove {
        all_in_required_equity_with(pot, call, bounty_bb, th)
    } else {
        required_equity_with(pot, call, bounty_bb, th)
    };
    // With a shove the villain's chips join the pot the hero can win.
    let winnable = if shove { pot + call } else { pot };
    let ev = equity.map(|e| call_ev(e, winnable, call, bounty_bb));
    let advice = CallAdvice::classify(req.bounty_adjusted_pct, th);

    println!();
    println!("{}", equity_table(pot, call, &req, ev));
    println!("  Bounty in pot: {:.2} BB", bounty_bb);
    println!(
        "  {}  {}",
        styled_call_advice(advice),
        advice.description()
    );
    println!();
    Ok(())
}

/// Bounty for the odds command: given directly in BB or converted from a token.
fn odds_bounty(
    config: &SessionConfig,
    bounty: Option<f64>,
    big_blind: Option<f64>,
    token: Option<f64>,
) -> KoResult<f64> {
    match (bounty, big_blind, token) {
        (Some(b), _, _) => non_negative_input("Bounty", b),
        (None, Some(bb), Some(t)) => {
            let bb = non_negative_input("Big blind", bb)?;
            let t = non_negative_input("Token value", t)?;
            Ok(BountyConversion::compute(config, bb, t).bounty_bb)
        }
        _ => Ok(0.0),
    }
}

fn cmd_spr(config: &SessionConfig, stack: f64, pot: f64) -> KoResult<()> {
    let stack = non_negative_input("Stack", stack)?;
    let pot = non_negative_input("Pot", pot)?;
    let result = spr_and_band_with(stack, pot, &config.thresholds);
    println!();
    println!("{}", spr_table(stack, pot, &result));
    println!();
    Ok(())
}

fn cmd_geo(stack: f64, pot: f64, streets: &[u32]) -> KoResult<()> {
    let stack = non_negative_input("Stack", stack)?;
    let pot = non_negative_input("Pot", pot)?;
    let sizings: Vec<GeometricSizing> = streets
        .iter()
        .map(|&n| geometric_sizing(stack, pot, n))
        .collect();
    let refs: Vec<&GeometricSizing> = sizings.iter().collect();

    println!();
    println!("{}", sizing_table(&refs));
    for sizing in sizings.iter().filter(|s| s.is_valid()) {
        println!(
            "  {}: bet {} of pot ({:.1} BB on the flop)",
            sizing.target(),
            format!("{:.1}%", sizing.pct_of_pot).bold(),
            sizing.first_bet
        );
    }
    println!();
    Ok(())
}

fn cmd_token(config: &SessionConfig, tier: Option<u32>) -> KoResult<()> {
    let buy_in = config.tournament.buy_in;
    match tier {
        Some(t) => {
            let entry = lookup_tier(t)?;
            println!();
            println!(
                "  {}: {}",
                entry.to_string().bold(),
                format!("{:.2}", entry.expected_value(buy_in)).bold()
            );
            if entry.is_fixed_minimum() {
                println!("  {}", "High value target: fixed minimum token.".yellow());
            }
            println!();
        }
        None => print_section(&format!("Token tiers at buy-in {:.2}", buy_in), &token_table(buy_in)),
    }
    Ok(())
}

fn cmd_analyze(config: &SessionConfig, hand: &HandState, json: bool) -> KoResult<()> {
    let report = HandReport::compute(config, hand);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report_view(&report));
    }
    Ok(())
}
