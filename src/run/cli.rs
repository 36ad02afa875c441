use anyhow::{anyhow, Result};
use std::io::{self, Write};

use crate::controller::{Controller, Request};
use crate::dispatch::execute;
use crate::models::{TransactionDetail, TransactionId};
use crate::source::TransactionSource;
use crate::ui::util::{format_amount, format_timestamp, truncate};

pub(crate) fn as_cli(args: &[String], source: &dyn TransactionSource) -> Result<()> {
    let mut out = io::stdout().lock();
    match args[1].as_str() {
        "list" | "ls" => cli_list(&args[2..], source, &mut out),
        "show" => cli_show(&args[2..], source, &mut out),
        "toggle" => cli_toggle(&args[2..], source, &mut out),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("txnview {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TxnView: browse and flag bank transactions");
    println!();
    println!("Usage: txnview [options] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  list [query]                  List transactions, optionally filtered");
    println!("  show <id>                     Print one transaction's details");
    println!("  toggle <id>                   Flip a transaction's internal transfer flag");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --api-url <url>               Transaction service base URL");
    println!("  --timeout <secs>              Per-request timeout");
    println!("  --retries <n>                 Retries after a network failure");
}

/// Fetch the list through the controller so the CLI sees the same state the TUI does.
fn load(source: &dyn TransactionSource) -> Result<Controller> {
    let mut controller = Controller::new();
    let request = controller.load();
    run(&mut controller, source, request)?;
    Ok(controller)
}

fn run(controller: &mut Controller, source: &dyn TransactionSource, request: Request) -> Result<()> {
    controller.complete(execute(source, request));
    match controller.take_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn parse_id(args: &[String], usage: &str) -> Result<TransactionId> {
    let raw = args.first().ok_or_else(|| anyhow!("Usage: {usage}"))?;
    raw.parse()
        .map_err(|_| anyhow!("Expected a transaction id, got '{raw}'"))
}

fn cli_list(args: &[String], source: &dyn TransactionSource, out: &mut impl Write) -> Result<()> {
    let mut controller = load(source)?;
    let query = args.join(" ");
    controller.set_filter_query(query.clone());
    controller.apply_filter();

    let state = controller.state();
    for txn in &state.visible {
        writeln!(
            out,
            "{:>6}  {}  {:<32}  {:<16}  {:>14}",
            txn.id,
            if txn.internal { "●" } else { "○" },
            truncate(&txn.description, 32),
            truncate(&txn.category, 16),
            format_amount(txn.amount),
        )?;
    }

    writeln!(out)?;
    if query.trim().is_empty() {
        writeln!(out, "{} transactions", state.all.len())?;
    } else {
        writeln!(
            out,
            "{} of {} transactions match '{}'",
            state.visible.len(),
            state.all.len(),
            query.trim()
        )?;
    }
    Ok(())
}

fn cli_show(args: &[String], source: &dyn TransactionSource, out: &mut impl Write) -> Result<()> {
    let id = parse_id(args, "txnview show <id>")?;
    let mut controller = load(source)?;
    let request = controller.select(id)?;
    run(&mut controller, source, request)?;

    let detail = controller
        .state()
        .selected_detail
        .as_ref()
        .ok_or_else(|| anyhow!("Transaction #{id} has no details"))?;
    print_detail(detail, out)
}

fn print_detail(detail: &TransactionDetail, out: &mut impl Write) -> Result<()> {
    let txn = &detail.summary;
    writeln!(out, "Transaction #{}", txn.id)?;
    writeln!(out, "  {:<18}{}", "Description", txn.description)?;
    writeln!(out, "  {:<18}{}", "Amount", format_amount(txn.amount))?;
    writeln!(out, "  {:<18}{}", "Category", txn.category)?;
    writeln!(out, "  {:<18}{}", "Merchant", detail.merchant_label())?;
    writeln!(out, "  {:<18}{}", "Payment Method", detail.payment_method_label())?;
    writeln!(out, "  {:<18}{}", "Reference Number", detail.reference_number)?;
    if let Some(notes) = detail.notes() {
        writeln!(out, "  {:<18}{}", "Notes", notes)?;
    }
    writeln!(out, "  {:<18}{}", "Type", txn.kind())?;
    writeln!(out, "  {:<18}{}", "Created", format_timestamp(&txn.created_at))?;
    Ok(())
}

fn cli_toggle(args: &[String], source: &dyn TransactionSource, out: &mut impl Write) -> Result<()> {
    let id = parse_id(args, "txnview toggle <id>")?;
    let mut controller = load(source)?;
    let request = controller.toggle_internal(id)?;
    run(&mut controller, source, request)?;

    let kind = controller
        .state()
        .all
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.kind())
        .ok_or_else(|| anyhow!("Transaction #{id} disappeared"))?;
    writeln!(out, "#{id} is now: {kind}")?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
