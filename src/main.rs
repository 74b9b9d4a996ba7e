//! gcmseal - Authenticated file encryption
//!
//! Usage:
//!   gcmseal encrypt <input> -o <output>                               - Encrypt a file
//!   gcmseal decrypt <input> -o <output> --key <hex> --iv <hex> --tag <hex>  - Decrypt and verify

use clap::{Parser, Subcommand};
use gcmseal::{file, KeyMaterial, Result};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "gcmseal")]
#[command(author = "gcmseal Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Encrypt and decrypt files with AES-256-GCM")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file under a freshly generated key and nonce
    Encrypt {
        /// Source file to be encrypted
        input: PathBuf,

        /// Encrypted output file
        #[arg(short, long)]
        output: PathBuf,

        /// Also save the key, nonce and tag as JSON to this path
        #[arg(long)]
        material_out: Option<PathBuf>,

        /// Print the key material as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decrypt a file and verify its authentication tag
    Decrypt {
        /// Encrypted file to be decrypted
        input: PathBuf,

        /// Save path for the decrypted file
        #[arg(short, long)]
        output: PathBuf,

        /// AES key, 64 hexadecimal characters
        #[arg(long, required_unless_present = "material")]
        key: Option<String>,

        /// GCM nonce (IV), 32 hexadecimal characters
        #[arg(long, visible_alias = "nonce", required_unless_present = "material")]
        iv: Option<String>,

        /// GCM authentication tag, 32 hexadecimal characters
        #[arg(long, required_unless_present = "material")]
        tag: Option<String>,

        /// Read key, nonce and tag from a JSON file written by `encrypt --material-out`
        #[arg(long, conflicts_with_all = ["key", "iv", "tag"])]
        material: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging, RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    if let Err(e) = run_command(cli.command) {
        if e.is_authentication_failure() {
            error!("Authentication failed (MAC check failed)");
        }
        error!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Encrypt {
            input,
            output,
            material_out,
            json,
        } => cmd_encrypt(&input, &output, material_out.as_deref(), json),

        Commands::Decrypt {
            input,
            output,
            key,
            iv,
            tag,
            material,
        } => {
            let material = match material {
                Some(path) => KeyMaterial::load(&path)?,
                None => KeyMaterial::from_hex(
                    key.as_deref().unwrap_or_default(),
                    iv.as_deref().unwrap_or_default(),
                    tag.as_deref().unwrap_or_default(),
                )?,
            };
            cmd_decrypt(&input, &output, &material)
        }
    }
}

fn cmd_encrypt(input: &Path, output: &Path, material_out: Option<&Path>, json: bool) -> Result<()> {
    let material = file::encrypt_file(input, output)?;

    if let Some(path) = material_out {
        material.save(path)?;
    }

    if json {
        println!("{}", material.to_json()?);
        return Ok(());
    }

    println!("--- File encrypted successfully ---");
    println!("Input file: {}", input.display());
    println!("Output file: {}", output.display());
    if let Some(path) = material_out {
        println!("Key material file: {}", path.display());
    }
    println!();
    println!("Please store the following securely, it is required for decryption:");
    println!();
    println!("Key:         {}", material.key.to_hex().as_str());
    println!("Nonce (IV):  {}", material.nonce.to_hex());
    println!("Tag:         {}", material.tag.to_hex());

    Ok(())
}

fn cmd_decrypt(input: &Path, output: &Path, material: &KeyMaterial) -> Result<()> {
    let written = file::decrypt_file(input, output, material)?;

    println!(
        "Decryption and verification successful. {} bytes saved to '{}'",
        written,
        output.display()
    );

    Ok(())
}
