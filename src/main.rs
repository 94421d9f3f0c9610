//! Filterer CLI - apply color filters to image files.

use anyhow::{bail, Context};
use filterer::prelude::*;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("filterer");

    if args.len() < 2 {
        print_usage(program);
        return;
    }

    let result = match args[1].as_str() {
        "list" => list_filters(),
        "info" => match args.get(2) {
            Some(name) => filter_info(name),
            None => Err(anyhow::anyhow!("Please specify a filter name")),
        },
        "apply" => apply(program, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("🎨 Filterer v{}", filterer::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                          List presets and adjustable filters");
    println!("  info <name>                   Show details for a preset or filter");
    println!("  apply <in> <out> [options]    Filter an image file");
    println!("  help                          Show this help message");
    println!();
    println!("Apply options (applied in the order given):");
    println!("  --preset <name>         Apply a preset with its fixed factor");
    println!("  --filter <Name>=<n>     Apply an adjustable filter with factor n");
    println!("  --step <Name>=<n>       Apply an adjustable filter at slider step n (0-5)");
    println!("  --settings <file.json>  Apply a JSON list of {{\"name\", \"factor\"}} settings");
    println!("  --config <file.toml>    Load custom presets and execution options");
    println!("  --parallel              Split large images across threads");
    println!("  --report                Print the apply report as JSON");
}

fn list_filters() -> anyhow::Result<()> {
    let processor = ImageProcessor::new();

    println!("Presets ({} total):", processor.presets().len());
    for (name, entry) in processor.presets().entries() {
        println!("  • {} [{}] - {}", name, entry.filter, entry.description);
    }
    println!();

    println!("Adjustable filters ({} total):", processor.adjustable().len());
    for (name, entry) in processor.adjustable().entries() {
        println!(
            "  • {} (default factor {}) - {}",
            name,
            entry.filter.factor(),
            entry.description
        );
    }
    Ok(())
}

fn filter_info(name: &str) -> anyhow::Result<()> {
    let processor = ImageProcessor::new();
    let mut found = false;

    if let Some(entry) = processor.presets().get_entry(name) {
        found = true;
        println!("Preset: {}", entry.label);
        println!("Filter: {}", entry.filter);
        println!("Factor: {} (fixed)", entry.filter.factor());
        println!("Description: {}", entry.description);
        println!();
    }

    if let Some(entry) = processor.adjustable().get_entry(name) {
        found = true;
        let kind = entry.filter.kind();
        println!("Adjustable filter: {}", entry.label);
        println!("Default factor: {}", entry.filter.factor());
        println!("Description: {}", entry.description);
        let steps: Vec<String> = (0..6)
            .filter_map(|step| factor_for_step(kind, step).map(|f| format!("{}:{}", step, f)))
            .collect();
        println!("Slider steps: {}", steps.join(" "));
    }

    if !found {
        let mut suggestions = processor.presets().search(name);
        suggestions.extend(processor.adjustable().search(name));
        if suggestions.is_empty() {
            bail!("Filter not found: {} (use 'list' to see available filters)", name);
        }
        bail!("Filter not found: {} (did you mean: {}?)", name, suggestions.join(", "));
    }
    Ok(())
}

/// One requested filter application, in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Preset(String),
    Setting(FilterSetting),
}

#[derive(Debug, Default)]
struct ApplyArgs {
    input: PathBuf,
    output: PathBuf,
    steps: Vec<Step>,
    config: Option<PathBuf>,
    parallel: bool,
    report: bool,
}

fn parse_apply_args(args: &[String]) -> anyhow::Result<ApplyArgs> {
    if args.len() < 2 {
        bail!("Please specify input and output paths");
    }

    let mut parsed = ApplyArgs {
        input: PathBuf::from(&args[0]),
        output: PathBuf::from(&args[1]),
        ..ApplyArgs::default()
    };

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        let takes_value = matches!(flag, "--preset" | "--filter" | "--step" | "--settings" | "--config");
        let value = if takes_value {
            match args.get(i + 1) {
                Some(v) => v.as_str(),
                None => bail!("Missing value for {}", flag),
            }
        } else {
            ""
        };

        match flag {
            "--preset" => parsed.steps.push(Step::Preset(value.to_string())),
            "--filter" => parsed.steps.push(Step::Setting(parse_setting(value)?)),
            "--step" => parsed.steps.push(Step::Setting(parse_step(value)?)),
            "--settings" => {
                let source = std::fs::read_to_string(value)
                    .with_context(|| format!("Failed to read settings file {}", value))?;
                let settings: Vec<FilterSetting> = serde_json::from_str(&source)
                    .map_err(FiltererError::from)
                    .with_context(|| format!("Invalid settings file {}", value))?;
                parsed.steps.extend(settings.into_iter().map(Step::Setting));
            }
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--parallel" => parsed.parallel = true,
            "--report" => parsed.report = true,
            _ => bail!("Unknown option: {}", flag),
        }

        i += if takes_value { 2 } else { 1 };
    }

    Ok(parsed)
}

/// Parse `Name=factor`.
fn parse_setting(value: &str) -> Result<FilterSetting, FiltererError> {
    let (name, factor) = value
        .split_once('=')
        .ok_or_else(|| FiltererError::InvalidSetting(value.to_string()))?;
    let factor = factor
        .trim()
        .parse::<i32>()
        .map_err(|_| FiltererError::InvalidSetting(value.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(FiltererError::InvalidSetting(value.to_string()));
    }
    Ok(FilterSetting::new(name, factor))
}

/// Parse `Name=step` into the setting for that slider position.
fn parse_step(value: &str) -> Result<FilterSetting, FiltererError> {
    let (name, step) = value
        .split_once('=')
        .ok_or_else(|| FiltererError::InvalidSetting(value.to_string()))?;
    let kind: FilterKind = name.parse()?;
    let step = step
        .trim()
        .parse::<u32>()
        .map_err(|_| FiltererError::InvalidSetting(value.to_string()))?;
    setting_for_step(kind, step).ok_or_else(|| FiltererError::InvalidSetting(value.to_string()))
}

fn apply(program: &str, args: &[String]) -> anyhow::Result<()> {
    let parsed = parse_apply_args(args)
        .with_context(|| format!("Usage: {} apply <input> <output> [options]", program))?;

    let mut config = match &parsed.config {
        Some(path) => ProcessorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProcessorConfig::default(),
    };
    if parsed.parallel {
        config.parallel = true;
    }
    let processor = ImageProcessor::with_config(config)?;

    let mut buffer = load_buffer(&parsed.input)
        .with_context(|| format!("Failed to load {}", parsed.input.display()))?;

    println!(
        "⚙️  Processing {} -> {}",
        parsed.input.display(),
        parsed.output.display()
    );
    let report = run_steps(&processor, &mut buffer, &parsed.steps);

    for applied in report.applied() {
        println!("   • {} [{}]", applied.name, applied.filter);
    }
    for issue in report.issues() {
        println!("⚠️  {}", issue);
    }

    save_buffer(&buffer, &parsed.output)
        .with_context(|| format!("Failed to save {}", parsed.output.display()))?;

    if parsed.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    println!("✅ {}", report.summary());
    Ok(())
}

fn run_steps(processor: &ImageProcessor, buffer: &mut PixelBuffer, steps: &[Step]) -> ApplyReport {
    if steps.is_empty() {
        let names: [&str; 0] = [];
        return processor.apply_filters(buffer, &names);
    }

    let mut report = ApplyReport::new();
    for step in steps {
        let step_report = match step {
            Step::Preset(name) => processor.apply_filter(buffer, name),
            Step::Setting(setting) => processor.apply_settings(buffer, std::slice::from_ref(setting)),
        };
        report.merge(step_report);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("Brightness=-20").unwrap(), FilterSetting::new("Brightness", -20));
        assert_eq!(parse_setting(" Sepia = 2 ").unwrap(), FilterSetting::new("Sepia", 2));
        assert!(matches!(parse_setting("Sepia"), Err(FiltererError::InvalidSetting(_))));
        assert!(matches!(parse_setting("Sepia=x"), Err(FiltererError::InvalidSetting(_))));
        assert!(matches!(parse_setting("=3"), Err(FiltererError::InvalidSetting(_))));
    }

    #[test]
    fn test_parse_step() {
        assert_eq!(parse_step("brightness=1").unwrap(), FilterSetting::new("Brightness", -60));
        assert_eq!(parse_step("Contrast=2").unwrap(), FilterSetting::new("Contrast", 3));
        assert!(matches!(parse_step("Brightness=6"), Err(FiltererError::InvalidSetting(_))));
        assert!(matches!(parse_step("Blur=1"), Err(FiltererError::UnknownFilterKind(_))));
    }

    #[test]
    fn test_parse_apply_args_keeps_order() {
        let parsed = parse_apply_args(&args(&[
            "in.png",
            "out.png",
            "--filter",
            "Contrast=2",
            "--preset",
            "Sepia",
            "--parallel",
            "--step",
            "Sepia=0",
        ]))
        .unwrap();

        assert_eq!(parsed.input, PathBuf::from("in.png"));
        assert!(parsed.parallel);
        assert_eq!(
            parsed.steps,
            vec![
                Step::Setting(FilterSetting::new("Contrast", 2)),
                Step::Preset("Sepia".to_string()),
                Step::Setting(FilterSetting::new("Sepia", 1)),
            ]
        );
    }

    #[test]
    fn test_parse_apply_args_errors() {
        assert!(parse_apply_args(&args(&["in.png"])).is_err());
        assert!(parse_apply_args(&args(&["in.png", "out.png", "--preset"])).is_err());
        assert!(parse_apply_args(&args(&["in.png", "out.png", "--bogus"])).is_err());
    }

    #[test]
    fn test_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"[{"name": "Brightness", "factor": 20}, {"filter": "Sepia", "factor": 1}]"#)
            .unwrap();

        let parsed = parse_apply_args(&args(&[
            "in.png",
            "out.png",
            "--settings",
            path.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(parsed.steps.len(), 2);
    }

    #[test]
    fn test_run_steps_mixes_registries() {
        let processor = ImageProcessor::new();
        let mut buffer = PixelBuffer::filled(1, 1, Pixel::opaque(100, 100, 100));
        let steps = vec![
            Step::Preset("+55Brightness".to_string()),
            Step::Setting(FilterSetting::new("Brightness", -5)),
            Step::Preset("Missing".to_string()),
        ];

        let report = run_steps(&processor, &mut buffer, &steps);
        assert_eq!(buffer.pixels()[0], Pixel::opaque(150, 150, 150));
        assert_eq!(report.applied().len(), 2);
        assert_eq!(report.skipped_names(), ["Missing"]);
    }

    #[test]
    fn test_run_steps_empty() {
        let processor = ImageProcessor::new();
        let mut buffer = PixelBuffer::filled(1, 1, Pixel::opaque(1, 2, 3));
        let report = run_steps(&processor, &mut buffer, &[]);
        assert_eq!(buffer.pixels()[0], Pixel::opaque(1, 2, 3));
        assert_eq!(report.issues().len(), 1);
    }
}
