use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use crypt3::{Algorithm, SaltSpec, gen_salt};
use tracing_subscriber::EnvFilter;
mod auth;

const LOG_ENV: &str = "CRYPT3_LOG";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// MD5-crypt ($1$), fixed 1000 rounds
    Md5,
    /// SHA-256-crypt ($5$)
    Sha256,
    /// SHA-512-crypt ($6$)
    Sha512,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Md5 => Algorithm::Md5,
            AlgorithmArg::Sha256 => Algorithm::Sha256,
            AlgorithmArg::Sha512 => Algorithm::Sha512,
        }
    }
}

#[derive(Debug, clap::Args)]
struct SaltArgs {
    /// Algorithm used for a generated salt
    #[arg(long, short, value_enum, default_value_t = AlgorithmArg::Sha512)]
    algorithm: AlgorithmArg,

    /// Rounds requested in a generated salt (SHA-2 only, clamped to 1000..=999999999)
    #[arg(long, short)]
    rounds: Option<u32>,
}

impl SaltArgs {
    fn generate(&self) -> Result<String> {
        gen_salt(self.algorithm.into(), self.rounds).context("failed to generate salt")
    }
}

#[derive(Debug, Parser)]
#[command(name = "crypt3")]
#[command(
    version,
    about = "crypt(3) compatible MD5, SHA-256 and SHA-512 password hashing."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password read from CRYPT3_PASSWORD, stdin or a prompt
    Hash {
        /// Salt specification, e.g. '$6$rounds=10000$saltstring'; generated when absent
        #[arg(long, short, value_name = "SALT", env = "CRYPT3_SALT")]
        salt: Option<String>,

        #[command(flatten)]
        generated: SaltArgs,

        /// Ask for the password twice
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },

    /// Prints a freshly generated salt specification
    Salt {
        #[command(flatten)]
        generated: SaltArgs,
    },

    /// Shows how a salt specification is parsed
    #[command(arg_required_else_help = true)]
    Inspect { salt: String },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn inspect(salt: &str) -> Result<()> {
    let spec = SaltSpec::parse(salt).context("failed to parse salt")?;

    println!("id:     {}", spec.id());
    println!("params: {}", spec.params().unwrap_or("-"));
    println!("text:   {}", spec.text());

    if spec.id() == 0 {
        println!("algorithm: legacy DES (delegated)");
        return Ok(());
    }

    let algorithm = Algorithm::resolve(spec.id())?;
    let d = algorithm.descriptor();
    let rounds = algorithm.requested_rounds(&spec)?;

    println!("algorithm: {} ({} byte digest)", d.digest_name, d.digest_len);
    match rounds {
        Some(rounds) => println!("rounds:    {rounds}"),
        None => println!("rounds:    {} (default)", d.default_rounds),
    }
    println!("salt used: {}", spec.text_truncated(d.max_salt_len));
    Ok(())
}

fn hash(salt: Option<String>, generated: &SaltArgs, confirm: bool) -> Result<()> {
    let salt = match salt {
        Some(s) if s.is_empty() => bail!("salt cannot be empty"),
        Some(s) => s,
        None => generated.generate()?,
    };
    let password = if confirm {
        auth::read_new_password_with_confirmation()?
    } else {
        auth::read_password()?
    };
    let hash = crypt3::crypt_password(&password, &salt)
        .with_context(|| format!("failed to hash password with salt '{salt}'"))?;
    drop(password);
    println!("{hash}");
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();
    match args.command {
        Commands::Hash {
            salt,
            generated,
            confirm,
        } => hash(salt, &generated, confirm)?,
        Commands::Salt { generated } => {
            println!("{}", generated.generate()?);
        }
        Commands::Inspect { salt } => inspect(&salt)?,
    }

    Ok(())
}
