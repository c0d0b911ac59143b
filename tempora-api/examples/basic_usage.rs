//! Basic usage of the tempora API

use tempora_api::{
    process_text, Config, ConfigBuilder, Edge, FixtureExtractor, Input, Period,
    TemporalExpression, TemporalProcessor, TimeSeries,
};

const TEXT: &str = "Secolul XX a fost important. Ștefan s-a născut în anul 1846.";

fn recorded_extractor() -> FixtureExtractor {
    let century = TimeSeries::new(
        "Secolul XX",
        "secolul XX",
        Edge::new("http://data.example.org/time/year/1901"),
        Edge::new("http://data.example.org/time/year/2000"),
    )
    .with_matches(["Secolul XX"])
    .with_periods(vec![Period::new("http://data.example.org/time/century/20")]);
    let year = TimeSeries::new(
        "anul 1846",
        "anul 1846",
        Edge::new("http://data.example.org/time/year/1846"),
        Edge::new("http://data.example.org/time/year/1846"),
    )
    .with_matches(["anul 1846"]);

    FixtureExtractor::new().with_entry(
        TEXT,
        vec![
            TemporalExpression::new(["Secolul XX"], vec![century]),
            TemporalExpression::new(["anul 1846"], vec![year]),
        ],
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: convenience function with the series preset
    println!("=== Method 1: Convenience Function ===");
    let output = process_text(TEXT, recorded_extractor())?;
    println!("Found {} entities:", output.len());
    for entity in &output.entities {
        println!(
            "  {} [{}] tokens {}-{}",
            entity.text, entity.label, entity.start_token, entity.end_token
        );
        for series in &entity.time_series {
            println!("    {} -> {}", series.start_uri, series.end_uri);
        }
    }
    println!("Processing took {:.3}ms\n", output.metadata.processing_time_ms);

    // Method 2: expression preset keeps tokens and folds accents
    println!("=== Method 2: Expression Preset ===");
    let processor = TemporalProcessor::with_config(recorded_extractor(), Config::expression())?;
    let output = processor.process(Input::from_text(TEXT))?;
    println!(
        "{} tokens before, {} after",
        output.metadata.tokens_before, output.metadata.tokens_after
    );

    // Method 3: custom configuration
    println!("\n=== Method 3: Custom Configuration ===");
    let processor = ConfigBuilder::default()
        .preset("series")?
        .label("TIMEX")
        .fuse_tokens(false)
        .threads(Some(2))
        .build_processor(recorded_extractor())?;
    let outputs = processor.process_batch(vec![Input::from_text(TEXT), Input::from_text("ieri")])?;
    for (index, output) in outputs.into_iter().enumerate() {
        let output = output?;
        println!("Input {}: {} entities", index, output.len());
    }

    Ok(())
}
