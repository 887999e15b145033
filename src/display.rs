use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::bounty::{BountyConversion, BountyImpact, TokenRating};
use crate::geometric::GeometricSizing;
use crate::odds::{CallAdvice, DiscountBand, EquityRequirement};
use crate::report::HandReport;
use crate::spr::{SprBand, SprResult};
use crate::tokens::{token_tiers, TierValue};

fn metric_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);
    table
}

fn row(table: &mut Table, label: &str, value: String) {
    table.add_row(vec![
        Cell::new(label.bold().to_string()),
        Cell::new(value).set_alignment(CellAlignment::Right),
    ]);
}

pub fn styled_impact(impact: BountyImpact) -> String {
    let label = impact.to_string().to_uppercase();
    match impact {
        BountyImpact::Low => label.green().bold().to_string(),
        BountyImpact::Medium => label.yellow().bold().to_string(),
        BountyImpact::High => label.red().bold().to_string(),
    }
}

pub fn styled_discount(band: DiscountBand) -> String {
    let label = band.to_string().to_uppercase();
    match band {
        DiscountBand::Minor => label.dimmed().bold().to_string(),
        DiscountBand::Noticeable => label.yellow().bold().to_string(),
        DiscountBand::Significant => label.green().bold().to_string(),
    }
}

pub fn styled_spr_band(band: SprBand) -> String {
    let label = band.to_string().to_uppercase();
    match band {
        SprBand::VeryLow => label.red().bold().to_string(),
        SprBand::Low => label.yellow().bold().to_string(),
        SprBand::Medium => label.bold().to_string(),
        SprBand::High => label.green().bold().to_string(),
        SprBand::VeryHigh => label.blue().bold().to_string(),
    }
}

pub fn styled_call_advice(advice: CallAdvice) -> String {
    let label = advice.to_string();
    match advice {
        CallAdvice::AnyTwo | CallAdvice::ExtremelyWide => label.green().bold().to_string(),
        CallAdvice::Wide => label.yellow().bold().to_string(),
        CallAdvice::Standard => label.bold().to_string(),
    }
}

pub fn bounty_table(bounty: &BountyConversion) -> String {
    let mut table = metric_table();
    row(&mut table, "Chip Value", format!("{:.6}", bounty.chip_value));
    row(&mut table, "1 BB Value", format!("{:.4}", bounty.one_bb_value));
    row(&mut table, "Token Value", format!("{:.2}", bounty.token_value));
    row(&mut table, "Cash Share", format!("{:.2}", bounty.cash_value));
    row(&mut table, "Future Token Share", format!("{:.2}", bounty.future_token_value));
    row(&mut table, "Bounty (chips)", format!("{:.0}", bounty.bounty_chips));
    row(
        &mut table,
        "Bounty (BB)",
        format!("{:.2} BB", bounty.bounty_bb).bold().to_string(),
    );
    row(&mut table, "Whole Token (BB)", format!("{:.2} BB", bounty.total_bounty_bb));
    row(&mut table, "Impact", styled_impact(bounty.impact));
    row(
        &mut table,
        "Token vs Start",
        format!(
            "{:.1}x ({})",
            bounty.assessment.multiplier,
            token_rating_style(bounty.assessment.rating)
        ),
    );
    table.to_string()
}

pub fn equity_table(pot: f64, call: f64, equity: &EquityRequirement, ev: Option<f64>) -> String {
    let mut table = metric_table();
    row(&mut table, "Pot", format!("{:.1} BB", pot));
    row(&mut table, "To Call", format!("{:.1} BB", call));
    row(&mut table, "Standard", format!("{:.1}%", equity.standard_pct));
    row(
        &mut table,
        "With Bounty",
        format!("{:.1}%", equity.bounty_adjusted_pct).bold().to_string(),
    );
    row(
        &mut table,
        "Discount",
        format!("{:.1} pts {}", equity.discount, styled_discount(equity.band)),
    );
    if let Some(ev_val) = ev {
        let ev_str = if ev_val >= 0.0 {
            format!("{:+.2} BB", ev_val).green().to_string()
        } else {
            format!("{:+.2} BB", ev_val).red().to_string()
        };
        row(&mut table, "EV of Call", ev_str);
        let verdict = if ev_val >= 0.0 {
            "CALL".green().bold().to_string()
        } else {
            "FOLD".red().bold().to_string()
        };
        row(&mut table, "Verdict", verdict);
    }
    table.to_string()
}

pub fn spr_table(stack: f64, pot: f64, result: &SprResult) -> String {
    let mut table = metric_table();
    row(&mut table, "Stack", format!("{:.1} BB", stack));
    row(&mut table, "Pot", format!("{:.1} BB", pot));
    row(&mut table, "SPR", format!("{:.2}", result.ratio).bold().to_string());
    row(&mut table, "Band", styled_spr_band(result.band));
    table.add_row(vec![
        Cell::new("Guidance".bold().to_string()),
        Cell::new(result.guidance),
    ]);
    table.to_string()
}

pub fn sizing_table(sizings: &[&GeometricSizing]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Target"),
        Cell::new("Street"),
        Cell::new("Pot").set_alignment(CellAlignment::Right),
        Cell::new("Bet").set_alignment(CellAlignment::Right),
        Cell::new("% Pot").set_alignment(CellAlignment::Right),
        Cell::new("Behind").set_alignment(CellAlignment::Right),
    ]);

    for sizing in sizings {
        if !sizing.is_valid() {
            table.add_row(vec![
                Cell::new(sizing.target().bold().to_string()),
                Cell::new("no valid sizing".dimmed().to_string()),
            ]);
            continue;
        }
        for (i, street) in sizing.schedule.iter().enumerate() {
            let target = if i == 0 {
                sizing.target().bold().to_string()
            } else {
                String::new()
            };
            table.add_row(vec![
                Cell::new(target),
                Cell::new(&street.street),
                Cell::new(format!("{:.1}", street.pot_before)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}", street.bet)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}%", sizing.pct_of_pot)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}", street.stack_after)).set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table.to_string()
}

pub fn token_table(buy_in: f64) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Tier"),
        Cell::new("Rule"),
        Cell::new("Avg Value").set_alignment(CellAlignment::Right),
    ]);
    for tier in token_tiers() {
        let rule = match tier.value {
            TierValue::Multiplier(m) => format!("{}x buy-in", m),
            TierValue::FixedMinimum(_) => "fixed minimum".yellow().to_string(),
        };
        table.add_row(vec![
            Cell::new(tier.tier.to_string().bold().to_string()),
            Cell::new(rule),
            Cell::new(format!("{:.2}", tier.expected_value(buy_in)))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn report_view(report: &HandReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "Bounty".cyan().bold()));
    out.push_str(&bounty_table(&report.bounty));
    out.push_str(&format!("\n  {}\n", report.bounty.impact.guidance()));

    out.push_str(&format!("\n{}\n", "Required Equity".cyan().bold()));
    if report.amount_to_call_bb > 0.0 {
        out.push_str(&equity_table(
            report.pot_before_bb,
            report.amount_to_call_bb,
            &report.equity,
            None,
        ));
        out.push_str(&format!(
            "\n  Call if your equity > {}  {}  {}\n",
            format!("{:.1}%", report.equity.bounty_adjusted_pct).bold(),
            styled_call_advice(report.call_advice),
            report.call_advice.description()
        ));
    } else {
        out.push_str(&format!("  {}\n", "Nothing to call.".dimmed()));
    }

    out.push_str(&format!("\n{}\n", "Stack-to-Pot Ratio".cyan().bold()));
    out.push_str(&spr_table(report.effective_stack_bb, report.pot_on_flop_bb, &report.spr));

    out.push_str(&format!("\n\n{}\n", "Geometric Sizing".cyan().bold()));
    out.push_str(&sizing_table(&[&report.turn, &report.river]));
    out.push('\n');
    out
}

pub fn token_rating_style(rating: TokenRating) -> String {
    let label = rating.to_string();
    match rating {
        TokenRating::HighValue => label.green().bold().to_string(),
        TokenRating::LowValue => label.dimmed().to_string(),
        TokenRating::Typical => label,
    }
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("{}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
