use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use indoc::indoc;
use log::{LevelFilter, debug, info, trace};
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use std::fs::{self, File};
use std::hint::black_box;
use std::io::{self, Write};
use std::path::Path;
use std::process::exit;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const MAX_LEN: usize = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ReportFormat {
    Table,
    Json,
}

/// xorshift128+, seeded through splitmix64.
struct Rng {
    state: [u64; 2],
}

impl Rng {
    fn from_seed(seed: u64) -> Self {
        let mut x = seed;
        let mut next = || {
            x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };
        let mut state = [next(), next()];
        if state == [0, 0] {
            state[0] = 1;
        }
        Rng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let [mut s1, s0] = self.state;
        let result = s0.wrapping_add(s1);
        s1 ^= s1 << 23;
        self.state = [s0, s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26)];
        result
    }
}

/// `size` zero-padded decimal fields of exactly `len` digits, stored back to back.
struct Corpus {
    len: usize,
    data: Vec<u8>,
}

impl Corpus {
    fn generate(rng: &mut Rng, len: usize, size: usize) -> Result<Self> {
        let modulus = 10u64.checked_pow(len as u32);
        let mut data = Vec::with_capacity(len * size);
        let mut buf = [0u8; MAX_LEN + 1];

        for _ in 0..size {
            let x = match modulus {
                Some(m) => rng.next_u64() % m,
                None => rng.next_u64(),
            };
            let n = swar::utoap_dyn(x, len, &mut buf)
                .with_context(|| format!("failed to format a {len}-digit field"))?;
            data.extend_from_slice(&buf[..n]);
        }

        Ok(Corpus { len, data })
    }

    fn fields(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.len)
    }
}

fn stock(s: &[u8]) -> u64 {
    std::str::from_utf8(s)
        .ok()
        .and_then(|t| t.parse::<u64>().ok())
        .unwrap_or(0)
}

fn naive(s: &[u8]) -> u64 {
    s.iter()
        .fold(0u64, |acc, &b| acc.wrapping_mul(10).wrapping_add(u64::from(b - b'0')))
}

type Method = fn(&[u8]) -> u64;

/// Timed in this order; the first entry is the loop overhead baseline.
const METHODS: [(&str, Method); 6] = [
    ("noop", |s| s.len() as u64),
    ("stock", stock),
    ("naive", naive),
    ("swar", swar::atou),
    ("swar8", |s| u64::from(swar::atou8(&s[..s.len().min(8)]))),
    ("swar4", |s| u64::from(swar::atou4(&s[..s.len().min(4)]))),
];

#[derive(Debug, Serialize)]
struct Row {
    len: usize,
    stock: f64,
    naive: f64,
    swar: f64,
    swar8: f64,
    swar4: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    size: usize,
    repetitions: usize,
    /// Nanoseconds per call, loop overhead subtracted.
    rows: Vec<Row>,
}

struct SwarBench {
    size: usize,
    repetitions: usize,
    seed: u64,
    output_format: ReportFormat,
    output: Box<dyn Write>,
    show_stats: bool,
    verbosity_level: Option<LevelFilter>,
}

impl SwarBench {
    fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let size = *matches.get_one::<usize>("size").expect("has default");
        let repetitions = *matches
            .get_one::<usize>("repetitions")
            .expect("has default");

        let seed = match matches.get_one::<u64>("seed") {
            Some(seed) => *seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0),
        };

        let output_format = match matches
            .get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("table")
        {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Table,
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            3 => Some(LevelFilter::Trace),
            _ => {
                eprintln!("using more than -vvv does not affect verbosity level");
                Some(LevelFilter::Trace)
            }
        };

        let output: Box<dyn Write> = match matches.get_one::<String>("output") {
            Some(path) => Box::new(Self::create_output_file(path)?),
            None => Box::new(io::stdout()),
        };

        Ok(SwarBench {
            size,
            repetitions,
            seed,
            output_format,
            output,
            show_stats: matches.get_flag("stats"),
            verbosity_level,
        })
    }

    fn create_output_file(path: impl AsRef<Path>) -> Result<File> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!(
                "There is a directory at {}, refusing to overwrite",
                p.display()
            );
        }

        if let Some(parent) = p.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        File::create(p).with_context(|| format!("failed to create {}", p.display()))
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level
            && let Err(e) = TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )
        {
            eprintln!("Failed to initialize logging: {e}");
        }
    }

    fn run(mut self) -> Result<()> {
        self.try_to_initialize_logging();

        if self.size == 0 || self.repetitions == 0 {
            bail!("--size and --repetitions must both be at least 1");
        }

        info!(
            "benchmarking {} fields x {} repetitions per length, seed {}",
            self.size, self.repetitions, self.seed
        );

        #[cfg(feature = "perf-counters")]
        swar::perf::reset();

        let mut rng = Rng::from_seed(self.seed);
        let mut checksum = 0u64;
        let mut rows = Vec::with_capacity(MAX_LEN);

        for len in 1..=MAX_LEN {
            let corpus = Corpus::generate(&mut rng, len, self.size)?;
            verify(&corpus)?;

            let best = self.time_methods(&corpus, &mut checksum);
            let per_call = |i: usize| {
                best[i].saturating_sub(best[0]).as_nanos() as f64 / self.size as f64
            };
            rows.push(Row {
                len,
                stock: per_call(1),
                naive: per_call(2),
                swar: per_call(3),
                swar8: per_call(4),
                swar4: per_call(5),
            });
            debug!("len {len}: best times {best:?}");
        }

        info!("checksum {checksum:#018x}");

        let report = Report {
            seed: self.seed,
            size: self.size,
            repetitions: self.repetitions,
            rows,
        };

        match self.output_format {
            ReportFormat::Table => write_table(&mut self.output, &report)?,
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut self.output, &report)
                    .context("failed to write JSON report")?;
                writeln!(self.output)?;
            }
        }
        self.output.flush().context("failed to flush report")?;

        if self.show_stats {
            #[cfg(feature = "perf-counters")]
            {
                let stats = swar::perf::snapshot();
                eprintln!(
                    "scan drivers: {} calls, {} words, {} short calls",
                    stats.calls, stats.words, stats.short_calls
                );
                swar::perf::log_summary();
            }
            #[cfg(not(feature = "perf-counters"))]
            eprintln!("--stats has no effect: built without the `perf-counters` feature");
        }

        Ok(())
    }

    /// Minimum wall time per method over all repetitions.
    fn time_methods(&self, corpus: &Corpus, checksum: &mut u64) -> [Duration; METHODS.len()] {
        let mut best = [Duration::MAX; METHODS.len()];

        for rep in 0..self.repetitions {
            for (i, (name, method)) in METHODS.iter().enumerate() {
                let start = Instant::now();
                let mut sum = 0u64;
                for field in corpus.fields() {
                    sum = sum.wrapping_add(method(black_box(field)));
                }
                let elapsed = start.elapsed();

                *checksum = checksum.wrapping_add(black_box(sum));
                best[i] = best[i].min(elapsed);
                trace!("len {} rep {rep} {name}: {elapsed:?}", corpus.len);
            }
        }

        best
    }
}

/// Check the SWAR parser against the standard library, walking a newline-separated copy of the
/// corpus with the scan drivers.
fn verify(corpus: &Corpus) -> Result<()> {
    let mut text = Vec::with_capacity(corpus.data.len() + corpus.data.len() / corpus.len);
    for field in corpus.fields() {
        text.extend_from_slice(field);
        text.push(b'\n');
    }

    let mut rest = text.as_slice();
    let mut count = 0usize;
    while let Some(end) = swar::pmemchr(rest, b'\n') {
        let field = &rest[..end];
        let (got, want) = (swar::atou(field), stock(field));
        if got != want {
            bail!(
                "atou disagrees with str::parse on {:?}: {got} != {want}",
                String::from_utf8_lossy(field)
            );
        }
        rest = &rest[end + 1..];
        count += 1;
    }

    debug!("verified {count} fields of length {}", corpus.len);
    Ok(())
}

fn write_table(out: &mut impl Write, report: &Report) -> Result<()> {
    writeln!(
        out,
        "{:>3} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "len", "stock", "naive", "swar", "swar8", "swar4"
    )?;
    for row in &report.rows {
        writeln!(
            out,
            "{:>3} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            row.len, row.stock, row.naive, row.swar, row.swar8, row.swar4
        )?;
    }
    Ok(())
}

fn command() -> Command {
    Command::new("swar_bench")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Omer B. <omerbenamram@gmail.com>")
        .about("Compare SWAR decimal parsing with the standard library")
        .long_about(indoc!(
            r#"
            Compare SWAR decimal parsing with the standard library.

            For every length from 1 to 20 digits, generates random zero-padded
            decimal fields and times str::parse, a naive byte loop, atou, atou8
            (first 8 digits) and atou4 (first 4 digits). The fastest of all
            repetitions is kept and the loop overhead subtracted.

            Results are nanoseconds per call.
        "#
        ))
        .arg(
            Arg::new("size")
                .long("size")
                .short('n')
                .value_name("N")
                .default_value("10000")
                .value_parser(clap::value_parser!(usize))
                .help("Number of fields generated per length."),
        )
        .arg(
            Arg::new("repetitions")
                .long("repetitions")
                .short('r')
                .value_name("R")
                .default_value("10")
                .value_parser(clap::value_parser!(usize))
                .help("Timing rounds per length; the fastest round is reported."),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(clap::value_parser!(u64))
                .help("Seed for the field generator (defaults to the current time)."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Write the report to a file instead of stdout."),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Report format."),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .action(ArgAction::SetTrue)
                .help("Print scan driver counters (requires the `perf-counters` feature)."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Sets debug prints level for the application (-v, -vv, -vvv)."),
        )
}

fn main() {
    let matches = command().get_matches();

    let bench = match SwarBench::from_cli_matches(&matches) {
        Ok(bench) => bench,
        Err(e) => {
            eprintln!("{e:?}");
            exit(1)
        }
    };

    if let Err(e) = bench.run() {
        eprintln!("{e:?}");
        exit(1)
    }
}
