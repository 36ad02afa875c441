use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::App;
use crate::models::TransactionId;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit TxnView", cmd_quit, r);
    register_command!("quit", "Quit TxnView", cmd_quit, r);
    register_command!(
        "filter",
        "Filter transactions (e.g. :filter coffee)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter transactions (e.g. :f coffee)", cmd_filter, r);
    register_command!("clear", "Clear the filter", cmd_clear, r);
    register_command!("reload", "Fetch transactions again", cmd_reload, r);
    register_command!("r", "Fetch transactions again", cmd_reload, r);
    register_command!("see", "Show transaction details (e.g. :see 42)", cmd_see, r);
    register_command!(
        "toggle",
        "Toggle internal transfer flag (e.g. :toggle 42)",
        cmd_toggle,
        r
    );
    register_command!("next", "Show the next transaction's details", cmd_next, r);
    register_command!("n", "Show the next transaction's details", cmd_next, r);
    register_command!("close", "Close transaction details", cmd_close, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn parse_id(args: &str) -> anyhow::Result<TransactionId> {
    args.parse()
        .map_err(|_| anyhow::anyhow!("Expected a transaction id, got '{args}'"))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.edit_query(args.to_string());
    app.apply_filter();
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.clear_filter();
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.reload();
    Ok(())
}

fn cmd_see(args: &str, app: &mut App) -> anyhow::Result<()> {
    let id = parse_id(args)?;
    app.see(id)
}

fn cmd_toggle(args: &str, app: &mut App) -> anyhow::Result<()> {
    let id = parse_id(args)?;
    app.toggle(id)
}

fn cmd_next(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.detail_open() {
        app.show_next();
    } else {
        app.set_status("No transaction is open");
    }
    Ok(())
}

fn cmd_close(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.close_detail();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
