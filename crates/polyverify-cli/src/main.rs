//! polyverify CLI
//!
//! Verify proofs from files with the same adapters the C ABI exposes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyverify_runtime::{ProvingSystemId, VerificationData, VerifierConfig};
use polyverify_verifier::Verifier;
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyverify")]
#[command(about = "Verify Groth16, PLONK, Circom, RISC Zero and SP1 proofs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a proof
    Verify {
        /// Proving system id (see `polyverify systems`)
        #[arg(short, long)]
        system: ProvingSystemId,

        /// Path to the proof file
        #[arg(short, long)]
        proof: PathBuf,

        /// Path to the public input file
        #[arg(short = 'i', long)]
        public_input: Option<PathBuf>,

        /// Path to the verifying key (pairing-based systems)
        #[arg(short, long)]
        vk: Option<PathBuf>,

        /// Path to the program: image id for risc0, ELF for sp1
        #[arg(long)]
        program: Option<PathBuf>,

        /// Path to a verifier configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List supported proving systems and their input formats
    Systems,
}

fn read_file(path: &Path, what: &str) -> Result<Vec<u8>> {
    fs::read(path).context(format!("Failed to read {} file: {:?}", what, path))
}

fn read_optional(path: Option<&PathBuf>, what: &str) -> Result<Option<Vec<u8>>> {
    path.map(|p| read_file(p, what)).transpose()
}

fn load_config(path: Option<&PathBuf>) -> Result<VerifierConfig> {
    match path {
        Some(path) => VerifierConfig::from_file(path)
            .context(format!("Failed to load configuration: {:?}", path)),
        None => Ok(VerifierConfig::default()),
    }
}

fn build_request(
    system: ProvingSystemId,
    proof: &Path,
    public_input: Option<&PathBuf>,
    vk: Option<&PathBuf>,
    program: Option<&PathBuf>,
) -> Result<VerificationData> {
    Ok(VerificationData {
        proving_system: system,
        proof: read_file(proof, "proof")?,
        pub_input: read_optional(public_input, "public input")?,
        verification_key: read_optional(vk, "verifying key")?,
        vm_program_code: read_optional(program, "program")?,
    })
}

/// Runs the request. Malformed artifacts are reported as a failed
/// verification; anything else that stops the check is an error.
fn run_verify(verifier: &Verifier, data: &VerificationData) -> Result<bool> {
    match verifier.verify(data) {
        Ok(verified) => Ok(verified),
        Err(e) if e.is_malformed_input() => {
            warn!(error = %e, "artifacts could not be decoded");
            println!("   Reason: {}", e);
            Ok(false)
        }
        Err(e) => Err(e).context(format!("Could not verify {} proof", data.proving_system)),
    }
}

fn input_format(system: ProvingSystemId) -> &'static str {
    match system {
        ProvingSystemId::Groth16Bn254 => "gnark proof + vk, public input = gnark public witness",
        ProvingSystemId::Groth16Bls12_381 => {
            "arkworks compressed proof + vk, public input = u64 LE count + scalars"
        }
        ProvingSystemId::PlonkBn254 => "gnark proof + vk, public input = gnark public witness",
        ProvingSystemId::PlonkBls12_381 => {
            "dusk-plonk proof + verifier, public input = 32-byte LE scalars"
        }
        ProvingSystemId::CircomGroth16Bn128 => {
            "snarkjs proof.json + verification_key.json, public input = public.json"
        }
        ProvingSystemId::Risc0 => "bincode receipt, program = 32-byte image id, input = journal",
        ProvingSystemId::SP1 => "bincode proof with public values, program = ELF",
    }
}

fn show_systems(verifier: &Verifier) {
    println!("📋 Supported proving systems");
    for system in ProvingSystemId::ALL {
        let engine = if verifier.has_engine(system) { "" } else { " (engine not built in)" };
        println!("   {:<22} {}{}", system.as_str(), input_format(system), engine);
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify { system, proof, public_input, vk, program, config } => {
            println!("🔍 polyverify");
            println!("   System: {}", system);
            println!();

            let config = load_config(config.as_ref())?;
            let verifier = Verifier::new(config).with_default_engines();
            let data = build_request(
                system,
                &proof,
                public_input.as_ref(),
                vk.as_ref(),
                program.as_ref(),
            )?;
            debug!(proof_len = data.proof.len(), "request loaded");

            if run_verify(&verifier, &data)? {
                println!("✅ Proof is VALID!");
            } else {
                println!("❌ Proof is INVALID!");
                anyhow::bail!("Proof verification failed");
            }
        }
        Commands::Systems => {
            show_systems(&Verifier::default().with_default_engines());
        }
    }

    Ok(())
}
