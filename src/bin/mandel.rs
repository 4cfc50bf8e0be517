// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::info;
use std::str::FromStr;
use std::time::Instant;

use mandelmagic::params::{parse_or, parse_pair};
use mandelmagic::{encode, presets, Framebuffer, Mixing, RenderOptions, RenderParams, Renderer};

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const HALF_HEIGHT: &str = "half-height";
const ITERATIONS: &str = "iterations";
const SAMPLES: &str = "samples";
const PRESET: &str = "preset";
const QUERY: &str = "query";
const THREADS: &str = "threads";
const SEED: &str = "seed";
const GAMMA_MIXING: &str = "gamma-mixing";
const LIST_PRESETS: &str = "list-presets";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Supersampled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required_unless(LIST_PRESETS)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .validator(|s| validate_pair::<i64>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WIDTHxHEIGHT [default: 512x512]"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Offset of the window on the complex plane, X,Y [default: -0.745,0.113]"),
        )
        .arg(
            Arg::with_name(HALF_HEIGHT)
                .long(HALF_HEIGHT)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_number::<f64>(&s, "Could not parse window height"))
                .help("Height of the window on the imaginary axis [default: 0.005]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .validator(|s| validate_number::<i64>(&s, "Could not parse iteration count"))
                .help("Iterations before a point counts as inside the set [default: 1000]"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .validator(|s| validate_number::<i64>(&s, "Could not parse sample count"))
                .help("Jittered samples per pixel [default: 10]"),
        )
        .arg(
            Arg::with_name(PRESET)
                .long(PRESET)
                .short("p")
                .takes_value(true)
                .conflicts_with(QUERY)
                .help("Start from a named preset (see --list-presets)"),
        )
        .arg(
            Arg::with_name(QUERY)
                .long(QUERY)
                .short("q")
                .takes_value(true)
                .help("Start from a query string, e.g. 'w=640&h=480&px=-0.5&py=0&ph=2.5'"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| validate_number::<usize>(&s, "Could not parse thread count"))
                .help("Number of worker threads [default: one per logical CPU]"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| validate_number::<u64>(&s, "Could not parse seed"))
                .help("Seed for the sample jitter [default: the clock]"),
        )
        .arg(
            Arg::with_name(GAMMA_MIXING)
                .long(GAMMA_MIXING)
                .help("Average samples without decoding to linear light"),
        )
        .arg(
            Arg::with_name(LIST_PRESETS)
                .long(LIST_PRESETS)
                .help("List the presets and exit"),
        )
        .get_matches()
}

fn list_presets() {
    for p in presets::PRESETS.iter() {
        println!(
            "{:<10} {:<18} --size {}x{} --center {},{} --half-height {} -i {} -n {}",
            p.key,
            p.name,
            p.params.width,
            p.params.height,
            p.params.center_x,
            p.params.center_y,
            p.params.half_height,
            p.params.max_iterations,
            p.params.samples
        );
    }
}

fn params(matches: &ArgMatches) -> Result<RenderParams, Error> {
    let mut params = if let Some(query) = matches.value_of(QUERY) {
        RenderParams::from_query(query)
    } else if let Some(name) = matches.value_of(PRESET) {
        match presets::find(name) {
            Some(preset) => preset.params,
            None => {
                return Err(format_err!(
                    "Unknown preset {:?}; try one of {}",
                    name,
                    presets::keys()
                ))
            }
        }
    } else {
        RenderParams::default()
    };

    if let Some(size) = matches.value_of(SIZE) {
        let (width, height) =
            parse_pair(size, 'x').ok_or_else(|| format_err!("Error parsing image dimensions"))?;
        params.width = width;
        params.height = height;
    }
    if let Some(center) = matches.value_of(CENTER) {
        let (x, y) =
            parse_pair(center, ',').ok_or_else(|| format_err!("Error parsing center point"))?;
        params.center_x = x;
        params.center_y = y;
    }
    params.half_height = parse_or(HALF_HEIGHT, matches.value_of(HALF_HEIGHT), params.half_height);
    params.max_iterations =
        parse_or(ITERATIONS, matches.value_of(ITERATIONS), params.max_iterations);
    params.samples = parse_or(SAMPLES, matches.value_of(SAMPLES), params.samples);

    Ok(params.sanitized())
}

fn options(matches: &ArgMatches) -> RenderOptions {
    let defaults = RenderOptions::default();
    RenderOptions {
        threads: parse_or(THREADS, matches.value_of(THREADS), defaults.threads),
        seed: parse_or(SEED, matches.value_of(SEED), defaults.seed),
        mixing: if matches.is_present(GAMMA_MIXING) {
            Mixing::Gamma
        } else {
            Mixing::Linear
        },
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    if matches.is_present(LIST_PRESETS) {
        list_presets();
        return Ok(());
    }

    let output = matches
        .value_of(OUTPUT)
        .ok_or_else(|| format_err!("No output file given"))?;
    let params = params(matches)?;
    let options = options(matches);

    info!(
        "Rendering with params: w={}, h={}, px={}, py={}, ph={}, iter={}, samples={}, threads={}, mixing={:?}",
        params.width,
        params.height,
        params.center_x,
        params.center_y,
        params.half_height,
        params.max_iterations,
        params.samples,
        options.threads,
        options.mixing
    );

    let start = Instant::now();
    let renderer = Renderer::new(params.viewport(), params.sample_spec(), options);
    let viewport = renderer.viewport();
    let mut fb = Framebuffer::new(viewport.width(), viewport.height());
    renderer.render(&mut fb);
    let rendered = Instant::now();
    info!("Rendering finished in {:?}", rendered - start);

    encode::write_png(&fb, output)
        .map_err(|e| format_err!("Could not write {}: {}", output, e))?;
    info!("Encoding finished in {:?}", rendered.elapsed());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
