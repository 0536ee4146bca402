use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use icu_translate::languages::PRESETS;
use icu_translate::{
    Arrangement, InputFormat, LanguageCode, LanguageSelection, TranslationResult, ids_tsv,
    presets_for, table_tsv, translations_tsv,
};
use icu_translate_mt::{
    GeminiConfig, GeminiProvider, IcuTranslator, MockMode, MockTranslator, MtError,
    translate_input,
};
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("icu-mt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate ICU messages from ARB, JS/TS or plain text into many languages")
        .arg(
            Arg::new("input")
                .help("File to read messages from (default: stdin)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Input format")
                .value_parser(["arb", "js", "ts", "text", "txt"])
                .default_value("text"),
        )
        .arg(
            Arg::new("arrangement")
                .long("arrangement")
                .short('a')
                .help("Language preset (default: first preset for the format)")
                .value_parser(PossibleValuesParser::new(PRESETS.iter().map(|p| p.name))),
        )
        .arg(
            Arg::new("languages")
                .long("languages")
                .short('l')
                .help("Custom comma-separated target languages, e.g. \"fr, de, ja\"")
                .conflicts_with("arrangement"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output layout")
                .value_parser(["tsv", "ids", "translations", "json", "table"])
                .default_value("tsv"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of the Gemini API")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-arrangements")
                .long("list-arrangements")
                .help("List the language presets for the format and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show detailed translation process")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&String>) -> std::io::Result<String> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn render_table(
    results: &[TranslationResult],
    languages: &[LanguageCode],
    with_ids: bool,
) -> String {
    let mut header: Vec<String> = Vec::new();
    if with_ids {
        header.push("ID".to_string());
    }
    header.push("Original".to_string());
    header.extend(languages.iter().map(|l| l.to_uppercase()));

    let mut lines = vec![header.join(" | ")];
    for result in results {
        let mut row: Vec<&str> = Vec::new();
        if with_ids {
            row.push(result.id.as_deref().unwrap_or_default());
        }
        row.push(&result.original);
        row.extend(languages.iter().map(|l| result.display_translation(l)));
        lines.push(row.join(" | "));
    }
    lines.join("\n")
}

fn render(
    output: &str,
    results: &[TranslationResult],
    languages: &[LanguageCode],
    format: InputFormat,
) -> Result<String, serde_json::Error> {
    Ok(match output {
        "ids" => ids_tsv(results),
        "translations" => translations_tsv(results, languages),
        "json" => serde_json::to_string_pretty(&serde_json::json!({
            "format": format,
            "languages": languages,
            "results": results,
        }))?,
        "table" => render_table(results, languages, format.has_ids()),
        _ => table_tsv(results, languages, format.has_ids()),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command().get_matches();
    let verbose = matches.get_flag("verbose");
    init_tracing(verbose);

    let format = match matches
        .get_one::<String>("format")
        .map(|f| f.parse::<InputFormat>())
    {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
        None => InputFormat::Text,
    };

    if matches.get_flag("list-arrangements") {
        for preset in presets_for(format) {
            println!(
                "{:<18} {:<36} {}",
                preset.name,
                preset.label,
                preset.languages(format).join(",")
            );
        }
        return ExitCode::SUCCESS;
    }

    let mut selection = LanguageSelection::new(format);
    if let Some(list) = matches.get_one::<String>("languages") {
        selection.set_arrangement(Arrangement::custom(list));
    } else if let Some(name) = matches.get_one::<String>("arrangement") {
        let requested = Arrangement::preset(name);
        selection.set_arrangement(requested.clone());
        if selection.arrangement() != &requested {
            tracing::warn!(
                requested = %name,
                format = %format,
                "Preset not offered for this format, using {:?}",
                selection.arrangement()
            );
        }
    }
    let languages = selection.languages();

    let input = match read_input(matches.get_one::<String>("input")) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("❌ Failed to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let translator: Box<dyn IcuTranslator> = if matches.get_flag("mock") {
        Box::new(MockTranslator::new(MockMode::Suffix))
    } else {
        match GeminiConfig::from_env().and_then(GeminiProvider::new) {
            Ok(provider) => Box::new(provider),
            Err(e) => {
                eprintln!("❌ {}", e.user_message());
                if matches!(e, MtError::ConfigError(_)) {
                    eprintln!("   Set it with: export GEMINI_API_KEY=your_api_key");
                    eprintln!("   Or use --mock to use mock translator");
                }
                return ExitCode::FAILURE;
            }
        }
    };

    if verbose {
        eprintln!("🌍 {} → {}", format, languages.join(", "));
        eprintln!("🔧 Provider: {}", translator.provider_name());
    }

    let results = match translate_input(translator.as_ref(), &input, format, &languages).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    if verbose {
        eprintln!("✅ Translated {} strings", results.len());
    }

    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("tsv");
    match render(output, &results, &languages, format) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Failed to render output: {}", e);
            ExitCode::FAILURE
        }
    }
}
