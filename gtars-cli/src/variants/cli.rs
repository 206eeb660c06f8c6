use clap::{Arg, ArgAction, Command, arg};

pub const VARIANTS_CMD: &str = "variants";

pub fn create_variants_cli() -> Command {
    Command::new(VARIANTS_CMD)
        .author("Databio")
        .about(
            "Normalize tokenized VCF records (JSON lines, optionally gzipped) \
             into canonical variant documents.",
        )
        .arg(
            Arg::new("records")
                .help("Path to the JSON-lines records; .gz and .bgz are decompressed")
                .required(true),
        )
        .arg(arg!(--"case-id" <case_id> "Id of the case the records belong to").required(true))
        .arg(
            arg!(--"case-name" <case_name>)
                .help("Display name of the case, as used by the ranking tool [default: case id]"),
        )
        .arg(
            arg!(--individual <individual>)
                .help("Individual of the case as id or id:display_name; repeat in pedigree order")
                .action(ArgAction::Append),
        )
        .arg(arg!(--config <config> "TOML parser config"))
        .arg(
            arg!(--"variant-type" <variant_type> "Override the variant type of the config")
                .value_parser(["clinical", "research"]),
        )
        .arg(
            arg!(--"rank-header" <rank_header> "Override the rank model header, comma separated")
                .value_delimiter(','),
        )
        .arg(
            arg!(--category <category> "Parse every record as this category")
                .value_parser(["snv", "sv"]),
        )
        .arg(arg!(--output <output> "Output file, gzipped when it ends in .gz [default: stdout]"))
}
