// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod payload;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fdi_ua::encoding::EncodingContext;
use fdi_ua::{CodecConfig, ExtensionObject};
use payload::BinaryFormat;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fdi-convert")]
#[command(about = "Convert and inspect OPC UA FDI extension objects (binary <-> XML)")]
#[command(version)]
struct Cli {
    /// Codec configuration (YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on extension objects of unregistered types
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Binary extension object to XML
    ToXml {
        /// Input file, `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Storage format of the binary input
        #[arg(long, value_enum, default_value = "raw")]
        format: BinaryFormat,
    },

    /// XML extension object to binary
    ToBinary {
        /// Input XML file, `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Storage format of the binary output
        #[arg(long, value_enum, default_value = "base64")]
        format: BinaryFormat,
    },

    /// Decode an extension object and print its content
    Inspect {
        /// Binary or XML input, `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Storage format of a binary input
        #[arg(long, value_enum, default_value = "raw")]
        format: BinaryFormat,

        /// Also dump the binary encoding
        #[arg(long)]
        hex: bool,
    },

    /// List registered types, or describe one
    Types {
        /// Type name to describe
        name: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("[ERROR] {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let context = encoding_context(cli.config.as_deref(), cli.strict)?;

    match cli.command {
        Commands::ToXml {
            input,
            output,
            format,
        } => cmd_to_xml(&context, &input, output.as_deref(), format),
        Commands::ToBinary {
            input,
            output,
            format,
        } => cmd_to_binary(&context, &input, output.as_deref(), format),
        Commands::Inspect { input, format, hex } => cmd_inspect(&context, &input, format, hex),
        Commands::Types { name } => cmd_types(&context, name.as_deref()),
    }
}

fn encoding_context(config: Option<&Path>, strict: bool) -> anyhow::Result<EncodingContext> {
    let mut config = match config {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    if strict {
        config.reject_unknown_encodings = true;
    }
    log::debug!("[fdi-convert] codec config: {config:?}");
    Ok(EncodingContext::new(config))
}

fn read_object(
    context: &EncodingContext,
    input: &Path,
    format: BinaryFormat,
) -> anyhow::Result<ExtensionObject> {
    let data = payload::read_input(input)?;
    if payload::looks_like_xml(&data) {
        let text = String::from_utf8(data).context("XML input is not UTF-8")?;
        return ExtensionObject::from_xml(&text, context).context("failed to decode XML");
    }
    let bytes = payload::decode_binary_payload(&data, format)?;
    ExtensionObject::from_binary(&bytes, context).context("failed to decode binary")
}

fn cmd_to_xml(
    context: &EncodingContext,
    input: &Path,
    output: Option<&Path>,
    format: BinaryFormat,
) -> anyhow::Result<()> {
    let data = payload::read_input(input)?;
    let bytes = payload::decode_binary_payload(&data, format)?;
    let object =
        ExtensionObject::from_binary(&bytes, context).context("failed to decode binary")?;
    let xml = object.to_xml(context)?;
    payload::write_output(output, xml.as_bytes())
}

fn cmd_to_binary(
    context: &EncodingContext,
    input: &Path,
    output: Option<&Path>,
    format: BinaryFormat,
) -> anyhow::Result<()> {
    let data = payload::read_input(input)?;
    let text = String::from_utf8(data).context("XML input is not UTF-8")?;
    let object = ExtensionObject::from_xml(&text, context).context("failed to decode XML")?;
    let bytes = object.to_binary(context)?;
    if output.is_none() && format == BinaryFormat::Raw {
        log::warn!("[fdi-convert] writing raw bytes to stdout");
    }
    payload::write_output(output, &payload::encode_binary_payload(&bytes, format))
}

fn cmd_inspect(
    context: &EncodingContext,
    input: &Path,
    format: BinaryFormat,
    hex: bool,
) -> anyhow::Result<()> {
    let object = read_object(context, input, format)?;

    match &object {
        ExtensionObject::Null => println!("[OK] null extension object"),
        ExtensionObject::Encodeable(body) => {
            let ids = body.type_ids();
            println!("[OK] {} ({})", body.type_name(), ids.namespace_uri);
            println!("  data type:       i={}", ids.data_type);
            println!("  binary encoding: i={}", ids.binary_encoding);
            println!("  xml encoding:    i={}", ids.xml_encoding);
            println!();
            println!("{body:#?}");
        }
        ExtensionObject::Binary { type_id, body } => {
            println!("[WARN] unregistered type {type_id}, {} byte body", body.as_bytes().len());
        }
        ExtensionObject::Xml { type_id, body } => {
            println!("[WARN] unregistered type {type_id}, XML body:");
            println!("{body}");
        }
    }

    if hex {
        let bytes = object.to_binary(context)?;
        println!();
        println!("{}", payload::hex_dump(&bytes));
    }
    Ok(())
}

fn cmd_types(context: &EncodingContext, name: Option<&str>) -> anyhow::Result<()> {
    let Some(name) = name else {
        let registrations = context.factory.registrations();
        println!("{} registered types:", registrations.len());
        for registration in registrations {
            let ids = registration.type_ids;
            println!(
                "  {:32} i={:<5} bin=i={:<5} xml=i={:<5} {}",
                registration.type_name,
                ids.data_type,
                ids.binary_encoding,
                ids.xml_encoding,
                ids.namespace_uri
            );
        }
        return Ok(());
    };

    let registration = context
        .factory
        .lookup_name(name)
        .with_context(|| format!("no type named '{name}'"))?;
    println!("{}", registration.definition());
    println!();
    println!("Default value as XML:");
    let sample = ExtensionObject::Encodeable(registration.default_value());
    println!("{}", sample.to_xml(context)?);
    Ok(())
}
