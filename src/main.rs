use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use shelf::api::{CmdMessage, ListedItem, MessageLevel, ShelfApi};
use shelf::config::ShelfConfig;
use shelf::error::{Result, ShelfError};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ShelfApi,
    config: ShelfConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add {
            name,
            category,
            stock,
        }) => handle_add(&mut ctx, name, category, stock),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Update {
            position,
            name,
            category,
            stock,
        }) => handle_update(&mut ctx, position, name, category, stock),
        Some(Commands::Delete { positions }) => handle_delete(&mut ctx, positions),
        Some(Commands::Find { name }) => handle_find(&ctx, name),
        Some(Commands::Search { term }) => handle_search(&ctx, term),
        Some(Commands::Low { threshold }) => handle_low(&ctx, threshold),
        Some(Commands::Sort { by }) => handle_sort(&mut ctx, by),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Path) => handle_path(&ctx),
        None => handle_list(&ctx),
    }
}

fn data_dir() -> PathBuf {
    // SHELF_HOME overrides the platform data directory (used by tests)
    if let Ok(home) = std::env::var("SHELF_HOME") {
        return PathBuf::from(home);
    }
    let proj_dirs =
        ProjectDirs::from("com", "shelf", "shelf").expect("Could not determine data dir");
    proj_dirs.data_dir().to_path_buf()
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let config = ShelfConfig::load(&data_dir)?;
    let api = ShelfApi::open(data_dir.join(&config.data_file))?;

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn handle_add(
    ctx: &mut AppContext,
    name: String,
    category: Option<String>,
    stock: i32,
) -> Result<()> {
    // An omitted category means "no category", which the store takes as ""
    let category = category.unwrap_or_default();
    let result = ctx.api.add_item(Some(&name), Some(&category), stock)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_items()?;
    print_items(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    position: usize,
    name: String,
    category: Option<String>,
    stock: i32,
) -> Result<()> {
    let category = category.unwrap_or_default();
    let result = ctx
        .api
        .update_item(position, Some(&name), Some(&category), stock)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, positions: Vec<usize>) -> Result<()> {
    let result = ctx.api.remove_items(&positions)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_find(ctx: &AppContext, name: String) -> Result<()> {
    let result = ctx.api.find_item(&name)?;
    print_items(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let result = ctx.api.search_items(&term)?;
    print_items(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_low(ctx: &AppContext, threshold: Option<i32>) -> Result<()> {
    let threshold = threshold.unwrap_or(ctx.config.low_stock_threshold);
    let result = ctx.api.low_stock_items(threshold)?;
    print_items(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_sort(ctx: &mut AppContext, by: args::SortField) -> Result<()> {
    let result = ctx.api.sort_items(by.into())?;
    ctx.api.save()?;
    print_items(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("data-file = {}", ctx.config.data_file);
            println!("low-stock = {}", ctx.config.low_stock_threshold);
        }
        (Some("data-file"), None) => println!("data-file = {}", ctx.config.data_file),
        (Some("low-stock"), None) => println!("low-stock = {}", ctx.config.low_stock_threshold),
        (Some("data-file"), Some(v)) => {
            ctx.config.data_file = v;
            ctx.config.save(&ctx.data_dir)?;
            println!("{}", format!("data-file set to {}", ctx.config.data_file).green());
        }
        (Some("low-stock"), Some(v)) => {
            let threshold: i32 = v
                .parse()
                .map_err(|_| ShelfError::Api(format!("Not a number: {}", v)))?;
            ctx.config.low_stock_threshold = threshold;
            ctx.config.save(&ctx.data_dir)?;
            println!("{}", format!("low-stock set to {}", threshold).green());
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.api.data_file().display());
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const NAME_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 18;

fn print_items(items: &[ListedItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    for listed in items {
        let item = &listed.item;

        let idx_str = format!("{:>3}. ", listed.position);
        let name = pad_to_width(&item.name(), NAME_WIDTH);
        let category = pad_to_width(&item.category(), CATEGORY_WIDTH);

        let stock_str = format!("{:>6}", item.stock());
        let stock_colored = if item.stock() == 0 {
            stock_str.red()
        } else {
            stock_str.normal()
        };

        println!(
            "{}{}  {}{}  {}",
            idx_str,
            name,
            category.dimmed(),
            stock_colored,
            format!("#{}", item.id()).dimmed()
        );
    }
}

/// Truncate to the display width (with an ellipsis when cut), then pad
/// with spaces up to that width so columns line up.
fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
