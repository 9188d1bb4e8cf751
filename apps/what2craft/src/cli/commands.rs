//! # CLI Command Implementations

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use std::io::Write;
use what2craft_core::{
    CatalogLoader, CatalogSummary, ClosureReport, DirectorySource, build_closure,
    build_closure_report,
};

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(config: &Config) -> Result<(), AppError> {
    println!("what2craft server starting...");
    println!();
    println!("Configuration:");
    println!("  Address:  {}", config.bind_addr());
    println!("  Items:    {}", config.items_dir.display());
    println!("  Edition:  {}", config.edition);
    if let Some(dir) = &config.static_dir {
        println!("  Assets:   {}", dir.display());
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /items  - Crafting-relevant items");
    println!("  GET  /health - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// ITEMS COMMAND
// =============================================================================

/// Compute the closure once and print it as a JSON array.
pub fn cmd_items(config: &Config, pretty: bool) -> Result<(), AppError> {
    let loader = CatalogLoader::new(config.edition.as_str());
    let catalog = loader.load(&DirectorySource::new(&config.items_dir))?;
    let closure = build_closure(&catalog);

    let encoded = if pretty {
        serde_json::to_string_pretty(&closure)
    } else {
        serde_json::to_string(&closure)
    };
    let output = encoded.map_err(|e| AppError::Io(format!("Cannot encode items: {}", e)))?;

    writeln!(std::io::stdout().lock(), "{}", output)
        .map_err(|e| AppError::Io(format!("Cannot write items: {}", e)))
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show catalog and closure counts.
pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), AppError> {
    let loader = CatalogLoader::new(config.edition.as_str());
    let catalog = loader.load(&DirectorySource::new(&config.items_dir))?;
    let report = build_closure_report(&catalog);
    let summary = CatalogSummary::new(&catalog, &report);

    if json_mode {
        println!("{}", status_json(config, &summary, &report)?);
        return Ok(());
    }

    println!("what2craft Catalog Status");
    println!("=========================");
    println!("Items:   {}", config.items_dir.display());
    println!("Edition: {}", config.edition);
    println!();
    println!("Catalog Items: {}", summary.catalog_items);
    println!("Closure Items: {}", summary.closure_items);
    println!("  Craftable:   {}", summary.craftable);
    println!("  Ingredients: {}", summary.ingredients);
    println!("  Placeholders: {}", summary.placeholders);
    for id in &report.placeholders {
        println!("    - {}", id);
    }

    Ok(())
}

/// Render the status counts as pretty JSON.
fn status_json(
    config: &Config,
    summary: &CatalogSummary,
    report: &ClosureReport,
) -> Result<String, AppError> {
    let output = serde_json::json!({
        "items_dir": config.items_dir.to_string_lossy(),
        "edition": config.edition,
        "catalog_items": summary.catalog_items,
        "closure_items": summary.closure_items,
        "craftable": summary.craftable,
        "ingredients": summary.ingredients,
        "placeholders": report.placeholders,
    });
    serde_json::to_string_pretty(&output)
        .map_err(|e| AppError::Io(format!("Cannot encode status: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use what2craft_core::MemorySource;

    #[test]
    fn status_json_lists_counts_and_placeholders() {
        let source = MemorySource::new().with_json(
            "axe",
            &serde_json::json!({
                "id": "axe",
                "name": "Axe",
                "games": {"nh": {"recipe": {"wood": 1}}}
            }),
        );
        let catalog = CatalogLoader::default().load(&source).expect("load");
        let report = build_closure_report(&catalog);
        let summary = CatalogSummary::new(&catalog, &report);

        let encoded = status_json(&Config::default(), &summary, &report).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&encoded).expect("valid json");

        assert_eq!(value["edition"], "nh");
        assert_eq!(value["catalog_items"], 1);
        assert_eq!(value["closure_items"], 2);
        assert_eq!(value["placeholders"], serde_json::json!(["wood"]));
    }
}
