extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate once_cell;
extern crate term_grid;

pub mod assembler;
pub mod files;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::path::{Path, PathBuf};

use assembler::emitter::{Assembler, LabelBinding, Options};
use assembler::lexer;
use assembler::tokenizer::Tokenizer;
use files::Outputs;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let ifile = match args.value_of("INPUT") {
        Some(f) => f,
        None => fatal("no input file given"),
    };
    let options = Options {
        header:  !args.is_present("no-header"),
        binding: if args.is_present("bind-next") { LabelBinding::NextUnit } else { LabelBinding::Reference },
    };

    debug!("Arguments:\n\tVerbosity: {}\n\tOutfile: {}\n\tInfile: {}\n\tOptions: {:?}",
        level_filter(args.occurrences_of("verbose")),
        args.value_of("output").unwrap_or("None"),
        ifile,
        options,
    );

    let ipath = Path::new(ifile);

    // Open the path in read-only mode, returns `io::Result<File>`
    let source = match File::open(&ipath) {
        Err(err) => fatal(&format!("unable to open input file `{}`: {}", ipath.display(), err)),
        Ok(file) => match lexer::read_source(Box::new(file)) {
            Ok(lines) => lines,
            Err(err) => fatal(&format!("unable to read input file `{}`: {}", ipath.display(), err)),
        },
    };

    let stem = match output_stem(ipath, args.value_of("output")) {
        Some(stem) => stem,
        None => fatal(&format!("cannot derive an output name from `{}`", ipath.display())),
    };
    let outputs = Outputs::new(&stem);
    if let Err(err) = outputs.clear() {
        fatal(&err);
    }

    let chunks: Vec<Vec<String>> = source.iter().map(|l| l.chunks.clone()).collect();
    let text: Vec<&str> = source.iter().map(|l| l.text.as_str()).collect();

    let mut tokenizer = Tokenizer::new();
    let lines = tokenizer.run(&chunks);

    let mut asm = Assembler::new(options);
    let bad = asm.count_bad_tokens(lines);
    if bad > 0 {
        for (index, line) in lines.iter().enumerate() {
            for token in line.iter().filter(|t| t.is_bad()) {
                asm.add_error(format!("line {}: {}", index + 1, token.description()));
            }
        }
        write_or_exit(&outputs.symbols, &asm.symbol_dump(lines));
        match asm.listing(lines, &text) {
            Ok(listing) => write_or_exit(&outputs.listing, &listing),
            Err(err) => fatal(&err),
        }
        error!("Stopped assembly due to {} tokenizer error(s).", bad);
        std::process::exit(1);
    }

    asm.pass1(lines);
    if let Err(err) = asm.pass2(lines) {
        fatal(&err);
    }

    let listing = match asm.listing(lines, &text) {
        Ok(listing) => listing,
        Err(err) => fatal(&err),
    };
    write_or_exit(&outputs.binary, &asm.binary_dump());
    write_or_exit(&outputs.symbols, &asm.symbol_dump(lines));
    write_or_exit(&outputs.listing, &listing);
    info!("assembled {} unit(s) into `{}`", asm.binary().len(), outputs.binary.display());

    if args.is_present("print-debug") {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });

        for (idx, unit) in asm.binary().iter().enumerate() {
            grid.add(Cell::from(format!("{:04}:", idx)));
            grid.add(Cell::from(format!("{}", unit)));
        }

        println!("{}", grid.fit_into_columns(2));
    }
}

/// The `-o` stem if given, else the input path with its extension removed.
fn output_stem(input: &Path, output: Option<&str>) -> Option<PathBuf> {
    match output {
        Some(filename) => Some(PathBuf::from(filename)),
        None => input.file_stem().map(|_| input.with_extension("")),
    }
}

fn fatal(message: &str) -> ! {
    error!("fatal: {}", message);
    std::process::exit(1);
}

fn write_or_exit(path: &Path, data: &str) {
    if let Err(err) = files::write_text(path, data) {
        fatal(&err);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("stem of the .bin, .sym and .lst outfiles"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .takes_value(false)
            .help("prints the assembled image to STDOUT"))
        .arg(Arg::with_name("no-header")
            .long("no-header")
            .takes_value(false)
            .help("do not prefix the image with its last index"))
        .arg(Arg::with_name("bind-next")
            .long("bind-next")
            .takes_value(false)
            .help("bind labels to the address of the next emitted unit"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_filter(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}

/// Maps the number of `-v` flags to a log level.
fn level_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}
