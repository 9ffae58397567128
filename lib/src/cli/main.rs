// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Command line utility for inspecting APDU payloads with the cursor buffer

use clap::Parser;
use log::{debug, info, LevelFilter};

use ledger_cursor::{cursor::Bip32Path, decode, decode_path, encode_path, Layout};

mod helpers;
use helpers::*;

/// Ledger cursor command line utility
#[derive(Clone, PartialEq, Debug, Parser)]
struct Options {
    /// Subcommand to execute
    #[clap(subcommand)]
    cmd: Actions,

    /// Enable verbose logging
    #[clap(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, PartialEq, Debug, Parser)]
#[non_exhaustive]
enum Actions {
    /// Decode a payload using a field layout
    Decode {
        /// Comma separated field layout
        #[clap(long, help = layout_help())]
        layout: Layout,

        /// Allow bytes following the final field
        #[clap(long)]
        allow_trailing: bool,

        /// Output format
        #[clap(long, value_enum, default_value_t = Format::Text)]
        output: Format,

        /// Hex encoded payload
        payload: HexData,
    },

    /// Encode a BIP32 path (eg. `m/44'/535348'/0'`) to wire format
    PathEncode {
        /// Derivation path
        path: String,
    },

    /// Decode a wire format BIP32 path
    PathDecode {
        /// Hex encoded path
        payload: HexData,
    },
}

/// Layout help text, listing supported fields
fn layout_help() -> String {
    let names: Vec<_> = Layout::field_names().collect();
    format!("Comma separated field layout ({})", names.join(", "))
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Options::parse();

    // Setup logging
    let _ = simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default());

    debug!("Executing command: {:?}", args.cmd);

    match args.cmd {
        Actions::Decode {
            layout,
            allow_trailing,
            output,
            payload,
        } => {
            info!("decoding {} bytes ({})", payload.0.len(), layout);

            let fields = decode(&layout, payload.as_ref(), allow_trailing)?;

            match output {
                Format::Text => {
                    for f in &fields {
                        println!(
                            "{:>3} {:<8} @{:<4} [{}] {}",
                            f.index, f.field, f.offset, f.len, f.value
                        );
                    }
                }
                Format::Json => {
                    let s = serde_json::to_string_pretty(&fields)?;
                    println!("{s}");
                }
            }
        }
        Actions::PathEncode { path } => {
            let d = encode_path(&path)?;

            info!("encoded path '{}' ({} bytes)", path, d.len());

            println!("{}", hex::encode(d));
        }
        Actions::PathDecode { payload } => {
            let p: Bip32Path = decode_path(payload.as_ref())?;

            info!("decoded {} level path", p.len());

            println!("{p}");
        }
    }

    Ok(())
}
