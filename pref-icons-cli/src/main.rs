//! Command line interface for prefecture icon generation.

mod emit;

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use pref_icons::{generate_icons, parse_selection, Level, Report, Style, PREFECTURES};
use serde::Serialize;

use crate::emit::Renderer;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "generate" => {
                cmd_generate(&args[2..]);
                return;
            }
            "regions" => {
                cmd_regions(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            _ => {}
        }

        // A bare GeoJSON path (or '-') works without the subcommand.
        if args[1] == "-" || args[1].ends_with(".geojson") || args[1].ends_with(".json") {
            cmd_generate(&args[1..]);
            return;
        }
    }

    print_usage(&args[0]);
    std::process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("pref-icons - prefecture icon generation from GeoJSON boundaries");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} generate <geojson> [options]", prog);
    eprintln!("  {} regions [--json]", prog);
    eprintln!();
    eprintln!("Generate options:");
    eprintln!("  -o, --out <dir>        Output directory (default: icons)");
    eprintln!("  --size <px>            Icon size in pixels (default: 256)");
    eprintln!("  --lw <n>               Border width as percent of size (default: 0.5)");
    eprintln!("  --face <color>         Fill color (default: #0E7A6F)");
    eprintln!("  --edge <color>         Border color (default: #0A5A52)");
    eprintln!("  --text <color>         Label color (default: #FFFFFF)");
    eprintln!("  --text-size <ratio>    Label height as fraction of size (default: 0.12)");
    eprintln!("  --padding <ratio>      Margin around the shape (default: 0.07)");
    eprintln!("  --hide-text            Draw no label");
    eprintln!("  --svg                  Keep the SVG source next to each PNG");
    eprintln!("  --prefecture <list>    Comma-separated codes or names to generate");
    eprintln!();
    eprintln!("Stdin support:");
    eprintln!("  Use '-' as input file to read GeoJSON from stdin:");
    eprintln!("  cat prefs.geojson | {} generate - -o icons", prog);
}

fn cmd_generate(args: &[String]) {
    let mut input_path: Option<&str> = None;
    let mut out_dir = String::from("icons");
    let mut selection_arg: Option<&str> = None;
    let mut keep_svg = false;
    let mut style = Style::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--out" => {
                i += 1;
                if i < args.len() {
                    out_dir = args[i].clone();
                }
            }
            "--size" => {
                i += 1;
                if i < args.len() {
                    style.size_px = args[i].parse().unwrap_or(style.size_px);
                }
            }
            "--lw" => {
                i += 1;
                if i < args.len() {
                    style.line_width = args[i].parse().unwrap_or(style.line_width);
                }
            }
            "--face" => {
                i += 1;
                if i < args.len() {
                    style.face_color = args[i].clone();
                }
            }
            "--edge" => {
                i += 1;
                if i < args.len() {
                    style.edge_color = args[i].clone();
                }
            }
            "--text" => {
                i += 1;
                if i < args.len() {
                    style.text_color = args[i].clone();
                }
            }
            "--text-size" => {
                i += 1;
                if i < args.len() {
                    style.text_size = args[i].parse().unwrap_or(style.text_size);
                }
            }
            "--padding" => {
                i += 1;
                if i < args.len() {
                    style.padding = args[i].parse().unwrap_or(style.padding);
                }
            }
            "--hide-text" => {
                style.show_text = false;
            }
            "--svg" => {
                keep_svg = true;
            }
            "--prefecture" => {
                i += 1;
                if i < args.len() {
                    selection_arg = Some(&args[i]);
                }
            }
            path => {
                if input_path.is_none() {
                    input_path = Some(path);
                }
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: GeoJSON file required (use '-' for stdin)");
        std::process::exit(1);
    });

    // Read GeoJSON from file or stdin
    let geojson = if input_path == "-" {
        eprintln!("Reading GeoJSON from stdin...");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).unwrap_or_else(|err| {
            eprintln!("Error: could not read stdin: {}", err);
            std::process::exit(1);
        });
        buffer
    } else {
        fs::read_to_string(input_path).unwrap_or_else(|err| {
            eprintln!("Error: could not read {}: {}", input_path, err);
            std::process::exit(1);
        })
    };

    let mut report = Report::new();

    let selection: Option<BTreeSet<u32>> =
        selection_arg.map(|arg| parse_selection(arg, &mut report));

    if let Some(codes) = &selection {
        if codes.is_empty() {
            print_events(&report);
            eprintln!("No regions matched the selection, nothing to do.");
            return;
        }
    }

    let icons = match generate_icons(&geojson, &style, selection.as_ref(), &mut report) {
        Ok(icons) => icons,
        Err(err) => {
            print_events(&report);
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    print_events(&report);

    if icons.is_empty() {
        eprintln!("Nothing to generate.");
        return;
    }

    let out_dir = PathBuf::from(&out_dir);
    let renderer = Renderer::new(&out_dir).unwrap_or_else(|err| {
        eprintln!("Error: could not prepare {}: {}", out_dir.display(), err);
        std::process::exit(1);
    });

    let mut failures = 0;
    for icon in &icons {
        match icon.name_romanized.as_deref() {
            Some(romanized) => eprintln!("  Generating: {} ({})", icon.name_local, romanized),
            None => eprintln!("  Generating: {}", icon.name_local),
        }
        if let Err(err) = renderer.write_icon(icon, style.size_px, keep_svg) {
            eprintln!("warning: [{}] {}", icon.name_local, err);
            failures += 1;
        }
    }

    eprintln!("Done! {} icons saved to {}/", icons.len() - failures, out_dir.display());

    if failures > 0 {
        std::process::exit(1);
    }
}

/// Print accumulated run events to stderr.
fn print_events(report: &Report) {
    for event in &report.events {
        let prefix = match event.level {
            Level::Warning => "warning: ",
            Level::Info => "",
        };
        match &event.region {
            Some(region) => eprintln!("{}[{}] {}", prefix, region, event.message),
            None => eprintln!("{}{}", prefix, event.message),
        }
    }
}

/// One row of the `regions --json` listing.
#[derive(Serialize)]
struct JsonRegion {
    code: u32,
    name: &'static str,
    romanized: &'static str,
}

fn cmd_regions(args: &[String]) {
    let json_output = args.iter().any(|arg| arg == "--json");

    if json_output {
        let rows: Vec<JsonRegion> = PREFECTURES
            .iter()
            .map(|r| JsonRegion {
                code: r.code,
                name: r.name_local,
                romanized: r.name_romanized,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).expect("Failed to serialize JSON")
        );
    } else {
        println!("Known prefectures:");
        for r in &PREFECTURES {
            println!("  {:02}  {}  ({})", r.code, r.name_local, r.name_romanized);
        }
    }
}
