use clap::{App, Arg, SubCommand};
use rayon::prelude::*;
#[macro_use]
extern crate log;
fn verbose() -> Arg<'static, 'static> {
    Arg::with_name("verbose")
        .short("v")
        .multiple(true)
        .help("Debug mode")
}

fn local_args(app: App<'static, 'static>) -> App<'static, 'static> {
    app.arg(verbose())
        .arg(
            Arg::with_name("query")
                .long("query")
                .short("q")
                .value_name("FASTA")
                .takes_value(true)
                .required(true)
                .help("Read. The first record is used. FASTA format."),
        )
        .arg(
            Arg::with_name("reference")
                .long("reference")
                .short("r")
                .value_name("FASTA")
                .takes_value(true)
                .required(true)
                .help("Reference. The first record is used. FASTA format."),
        )
        .arg(
            Arg::with_name("pos")
                .long("pos")
                .short("p")
                .takes_value(true)
                .default_value("0")
                .help("0-based start position of the alignment in the reference."),
        )
        .arg(
            Arg::with_name("edits")
                .long("edits")
                .short("e")
                .takes_value(true)
                .required(true)
                .help("Edit operations, e.g., MMDMMIM"),
        )
        .arg(
            Arg::with_name("cigar")
                .long("cigar")
                .help("Read the edit operations as a CIGAR string, e.g., 2M1D2M1I1M"),
        )
}

fn subcommand_encode() -> App<'static, 'static> {
    SubCommand::with_name("encode")
        .version("0.1")
        .author("Bansho Masutani")
        .about("Gapped rows(FASTA)->Ungapped sequences and edit operations(TSV)")
        .arg(verbose())
        .arg(
            Arg::with_name("alignment")
                .long("alignment")
                .short("a")
                .value_name("FASTA")
                .takes_value(true)
                .help("Pairwise alignments. Each consective two records are the two rows. Stdin if absent."),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .short("t")
                .takes_value(true)
                .default_value("1")
                .help("Number of threads"),
        )
}

fn subcommand_decode() -> App<'static, 'static> {
    let app = SubCommand::with_name("decode")
        .version("0.1")
        .author("Bansho Masutani")
        .about("Read x Reference x Edit operations->Pairwise alignment(TEXT)");
    local_args(app)
}

fn subcommand_dist() -> App<'static, 'static> {
    let app = SubCommand::with_name("dist")
        .version("0.1")
        .author("Bansho Masutani")
        .about("Read x Reference x Edit operations->Edit distance");
    local_args(app)
}

fn to_io_error(why: alnedit::AlignError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, why)
}

fn first_record(matches: &clap::ArgMatches, name: &str) -> std::io::Result<alnedit::fasta::FASTARecord> {
    let file = matches.value_of(name);
    alnedit::fasta::read_fasta(&file)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            let msg = format!("No record in --{}", name);
            std::io::Error::new(std::io::ErrorKind::InvalidData, msg)
        })
}

struct LocalInput {
    query: alnedit::fasta::FASTARecord,
    reference: alnedit::fasta::FASTARecord,
    pos: usize,
    ops: Vec<alnedit::Op>,
}

fn local_input(matches: &clap::ArgMatches) -> std::io::Result<LocalInput> {
    let query = first_record(matches, "query")?;
    let reference = first_record(matches, "reference")?;
    let pos: usize = matches
        .value_of("pos")
        .and_then(|e| e.parse().ok())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "--pos"))?;
    let edits = matches.value_of("edits").unwrap_or("");
    let ops = if matches.is_present("cigar") {
        alnedit::op::parse_cigar(edits)
    } else {
        alnedit::op::parse_edits(edits.as_bytes())
    }
    .map_err(to_io_error)?;
    debug!("{} against {} at {}", query.0, reference.0, pos);
    Ok(LocalInput {
        query,
        reference,
        pos,
        ops,
    })
}

fn encode(matches: &clap::ArgMatches) -> std::io::Result<()> {
    let records = alnedit::fasta::read_fasta(&matches.value_of("alignment"))?;
    if records.len() % 2 == 1 {
        warn!("Odd number of records. The last one is ignored.");
    }
    let encoded: Vec<_> = records
        .par_chunks_exact(2)
        .map(|pair| -> alnedit::Result<String> {
            let (p, q, ops) = alnedit::encode(&pair[0].1, &pair[1].1)?;
            let line = format!(
                "{}\t{}\t{}\t{}\t{}",
                pair[0].0,
                String::from_utf8_lossy(&p),
                String::from_utf8_lossy(&q),
                alnedit::op::edits_to_string(&ops),
                alnedit::op::to_cigar(&ops),
            );
            Ok(line)
        })
        .collect::<alnedit::Result<_>>()
        .map_err(to_io_error)?;
    debug!("Encoded {} alignments", encoded.len());
    use std::io::Write;
    let stdout = std::io::stdout();
    let mut wtr = std::io::BufWriter::new(stdout.lock());
    for line in encoded {
        writeln!(wtr, "{}", line)?;
    }
    Ok(())
}

fn decode(matches: &clap::ArgMatches) -> std::io::Result<()> {
    let input = local_input(matches)?;
    let window = alnedit::reference_window(&input.reference.1, input.pos, &input.ops)
        .map_err(to_io_error)?;
    let (qr, aln, rr) =
        alnedit::op::recover(&input.query.1, window, &input.ops).map_err(to_io_error)?;
    println!("{}", String::from_utf8_lossy(&qr));
    println!("{}", String::from_utf8_lossy(&aln));
    println!("{}", String::from_utf8_lossy(&rr));
    Ok(())
}

fn dist(matches: &clap::ArgMatches) -> std::io::Result<()> {
    let input = local_input(matches)?;
    let dist =
        alnedit::local_edit_distance(&input.query.1, &input.reference.1, input.pos, &input.ops)
            .map_err(to_io_error)?;
    println!("{}\t{}\t{}", input.query.0, input.reference.0, dist);
    Ok(())
}

fn main() -> std::io::Result<()> {
    let matches = App::new("alnedit")
        .version("0.1")
        .author("Bansho Masutani")
        .about("Encode:[FASTA]->TSV, Decode:[FASTA]x[FASTA]x[EDITS]->TEXT, or Dist:[FASTA]x[FASTA]x[EDITS]->Distance")
        .setting(clap::AppSettings::ArgRequiredElseHelp)
        .subcommand(subcommand_encode())
        .subcommand(subcommand_decode())
        .subcommand(subcommand_dist())
        .get_matches();
    if let Some(sub_m) = matches.subcommand().1 {
        let level = match sub_m.occurrences_of("verbose") {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
        let threads: usize = sub_m
            .value_of("threads")
            .and_then(|x| x.parse().ok())
            .unwrap_or(1);
        if let Err(why) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            debug!("{:?} The global pool is already built.", why);
        }
    }
    debug!("Start");
    match matches.subcommand() {
        ("encode", Some(sub_m)) => encode(sub_m),
        ("decode", Some(sub_m)) => decode(sub_m),
        ("dist", Some(sub_m)) => dist(sub_m),
        _ => unreachable!(),
    }
}
