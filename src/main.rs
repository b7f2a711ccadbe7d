//! # svgattr CLI
//!
//! Usage:
//!   svgattr input.json -o shapes.json
//!   echo '{ ... }' | svgattr
//!   svgattr --example > document.json
//!
//! `-v` turns on debug logging; `RUST_LOG` overrides it.

use std::env;
use std::fs;
use std::io::{self, Read};

use svgattr::SvgAttrError;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_document_json());
        return;
    }

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    init_logging(verbose);

    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "svgattr=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &[String]) -> Result<(), SvgAttrError> {
    // First positional argument that isn't the value of -o
    let input_path = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, a)| !a.starts_with('-') && args[i - 1] != "-o")
        .map(|(_, a)| a.clone());

    let input = match &input_path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = svgattr::resolve_json(&input)?;

    match args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone()) {
        Some(path) => {
            fs::write(&path, output.as_bytes())?;
            eprintln!("✓ Written {} bytes to {}", output.len(), path);
        }
        None => println!("{}", output),
    }
    Ok(())
}

fn example_document_json() -> &'static str {
    r##"{
  "options": { "maxTransformFunctions": 64 },
  "elements": [
    {
      "tag": "g",
      "attributes": { "id": "badge", "transform": "translate(20,20) rotate(-15 50 25)" },
      "children": [
        {
          "tag": "rect",
          "attributes": {
            "width": "100",
            "height": "50",
            "rx": "8",
            "fill": "#1e88e5",
            "stroke": "navy",
            "stroke-width": "2",
            "stroke-dasharray": "6,3"
          }
        },
        {
          "tag": "text",
          "attributes": { "x": "50", "y": "30", "text-anchor": "middle", "fill": "white" },
          "text": "svgattr"
        }
      ]
    },
    {
      "tag": "path",
      "attributes": {
        "d": "M10 80 C 40 10, 65 10, 95 80 S 150 150, 180 80",
        "fill": "none",
        "stroke": "rgb(200, 40, 40)",
        "stroke-opacity": "0.8",
        "transform": "matrix(1 0 0 1 0 40)"
      }
    },
    {
      "tag": "use",
      "attributes": { "xlink:href": "#badge", "x": "200", "style": "opacity: 0.5" }
    }
  ]
}
"##
}
