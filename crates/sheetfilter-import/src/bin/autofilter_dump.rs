use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use sheetfilter_import::{import_autofilter_biff12, import_autofilter_xml_reader, ImportOptions};

#[derive(Parser)]
#[command(about = "Import the AutoFilter block of one worksheet part and print it as JSON.")]
struct Args {
    /// Worksheet part (`sheetN.xml`, or `sheetN.bin` with `--binary`).
    path: PathBuf,

    /// Zero-based sheet index used to qualify ranges.
    #[arg(long, default_value_t = 0)]
    sheet: u16,

    /// Read BIFF12 records instead of XML. Implied by a `.bin` extension.
    #[arg(long)]
    binary: bool,

    /// Fail when a filter column declares more than one filter kind.
    #[arg(long)]
    strict: bool,

    /// Maximum nesting below `autoFilter`.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the finalized filter descriptor instead of the imported model.
    #[arg(long)]
    finalize: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = ImportOptions {
        strict_filter_kinds: args.strict,
        ..ImportOptions::default()
    };
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }

    let binary = args.binary
        || args
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"));
    let file = File::open(&args.path)
        .with_context(|| format!("open worksheet part {}", args.path.display()))?;
    let input = BufReader::new(file);

    let imported = if binary {
        import_autofilter_biff12(input, args.sheet, &options)
    } else {
        import_autofilter_xml_reader(input, args.sheet, &options)
    }
    .with_context(|| format!("import AutoFilter from {}", args.path.display()))?;

    let Some(auto_filter) = imported else {
        log::info!("{} has no AutoFilter", args.path.display());
        println!("null");
        return Ok(());
    };

    let json = if args.finalize {
        serde_json::to_string_pretty(&auto_filter.finalize())?
    } else {
        serde_json::to_string_pretty(&auto_filter)?
    };
    println!("{json}");
    Ok(())
}
