use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use gtars_variants::{
    CanonicalVariant, Case, Category, LogSink, ParserConfig, RawVariantRecord, VariantParser,
    VariantType, parse_batch,
};

fn open_records(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).context(format!("Failed to open records: {}", path))?;
    let capacity = 256 * 1024;
    if path.ends_with(".gz") || path.ends_with(".bgz") {
        Ok(Box::new(BufReader::with_capacity(
            capacity,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(capacity, file)))
    }
}

fn create_output(path: Option<&String>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).context(format!("Failed to create output: {}", path))?;
            if path.ends_with(".gz") {
                Ok(Box::new(BufWriter::new(GzEncoder::new(
                    file,
                    Compression::default(),
                ))))
            } else {
                Ok(Box::new(BufWriter::new(file)))
            }
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Read one record per line; blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<RawVariantRecord>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {pos} records read {msg}")?);

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.context(format!("Failed to read line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: RawVariantRecord = serde_json::from_str(&line)
            .context(format!("Invalid record on line {}", i + 1))?;
        records.push(record);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(records)
}

/// Config file (if any) with the command line overrides applied.
pub fn build_config(matches: &ArgMatches) -> Result<ParserConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ParserConfig::try_from(Path::new(path))
            .context(format!("Failed to load parser config: {}", path))?,
        None => ParserConfig::default(),
    };

    if let Some(variant_type) = matches.get_one::<String>("variant-type") {
        config.variant_type = variant_type
            .parse::<VariantType>()
            .map_err(anyhow::Error::msg)?;
    }
    if let Some(header) = matches.get_many::<String>("rank-header") {
        config.rank_results_header = header.cloned().collect();
    }
    if let Some(category) = matches.get_one::<String>("category") {
        config.category = Some(category.parse::<Category>().map_err(anyhow::Error::msg)?);
    }

    Ok(config)
}

pub fn build_case(matches: &ArgMatches) -> Result<Case> {
    let case_id = matches
        .get_one::<String>("case-id")
        .context("A case id is required.")?;
    let case_name = matches.get_one::<String>("case-name").unwrap_or(case_id);

    let mut case = Case::new(case_id, case_name);
    for individual in matches.get_many::<String>("individual").into_iter().flatten() {
        case = match individual.split_once(':') {
            Some((id, name)) => case.with_individual(id, name),
            None => case.with_individual(individual, individual),
        };
    }
    Ok(case)
}

pub fn write_variants<W: Write>(mut writer: W, variants: &[CanonicalVariant]) -> Result<()> {
    for variant in variants {
        serde_json::to_writer(&mut writer, variant)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn run_variants(matches: &ArgMatches) -> Result<()> {
    let records_path = matches
        .get_one::<String>("records")
        .context("A path to the records is required.")?;

    let config = build_config(matches)?;
    let case = build_case(matches)?;

    let records = read_records(open_records(records_path)?)?;
    info!(
        "Parsing {} records for case {} as {} variants",
        records.len(),
        case.case_id,
        config.variant_type
    );

    let parser = VariantParser::new(config);
    let report = parse_batch(&records, &case, &parser, &LogSink);

    let writer = create_output(matches.get_one::<String>("output"))?;
    write_variants(writer, &report.variants)?;

    if report.malformed_count() > 0 {
        warn!(
            "Skipped {} malformed records of {}",
            report.malformed_count(),
            records.len()
        );
    }
    info!("Wrote {} variants", report.variants.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Read;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::variants::cli::create_variants_cli;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["variants"];
        argv.extend_from_slice(args);
        create_variants_cli().try_get_matches_from(argv).unwrap()
    }

    #[rstest]
    fn test_case_from_args() {
        let m = matches(&[
            "records.jsonl",
            "--case-id",
            "cust000-643594",
            "--case-name",
            "643594",
            "--individual",
            "ADM1059A1:NA12877",
            "--individual",
            "ADM1059A2",
        ]);
        let case = build_case(&m).unwrap();
        assert_eq!(
            case,
            Case::new("cust000-643594", "643594")
                .with_individual("ADM1059A1", "NA12877")
                .with_individual("ADM1059A2", "ADM1059A2")
        );
    }

    #[rstest]
    fn test_case_name_defaults_to_id() {
        let case = build_case(&matches(&["records.jsonl", "--case-id", "c1"])).unwrap();
        assert_eq!(case.display_name, "c1");
        assert!(case.individuals.is_empty());
    }

    #[rstest]
    fn test_overrides() {
        let m = matches(&[
            "records.jsonl",
            "--case-id",
            "c1",
            "--variant-type",
            "research",
            "--rank-header",
            "a,b,c",
            "--category",
            "sv",
        ]);
        let config = build_config(&m).unwrap();
        assert_eq!(config.variant_type, VariantType::Research);
        assert_eq!(config.rank_results_header, vec!["a", "b", "c"]);
        assert_eq!(config.category, Some(Category::Sv));
    }

    #[rstest]
    fn test_rejects_unknown_category() {
        let result = create_variants_cli().try_get_matches_from([
            "variants",
            "records.jsonl",
            "--case-id",
            "c1",
            "--category",
            "cnv",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_read_and_write() {
        let input = concat!(
            r#"{"CHROM":"1","POS":100,"REF":"A","ALT":"G"}"#,
            "\n\n",
            r#"{"CHROM":"1","POS":"200","REF":"AT","ALT":"A","QUAL":12.5}"#,
            "\n",
        );
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let case = Case::new("c1", "c1");
        let report = parse_batch(&records, &case, &VariantParser::default(), &LogSink);

        let mut out: Vec<u8> = Vec::new();
        write_variants(&mut out, &report.variants).unwrap();
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["sub_category"], "snv");
        assert_eq!(lines[1]["sub_category"], "indel");
        assert_eq!(lines[1]["quality"], 12.5);
    }

    #[rstest]
    #[case("records.jsonl.gz", "variants.jsonl.gz")]
    #[case("records.jsonl", "variants.jsonl")]
    fn test_files_round_trip(#[case] input_name: &str, #[case] output_name: &str) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(input_name);
        let output = dir.path().join(output_name);

        let lines = concat!(
            r#"{"CHROM":"1","POS":100,"REF":"A","ALT":"G"}"#,
            "\n",
            r#"{"CHROM":"2","POS":500,"REF":"N","ALT":"<DEL>","#,
            r#""info_dict":{"SVTYPE":["DEL"],"END":["650"]}}"#,
            "\n",
        );
        {
            let mut writer = create_output(Some(&input.to_string_lossy().to_string())).unwrap();
            writer.write_all(lines.as_bytes()).unwrap();
            writer.flush().unwrap();
        }

        let records = read_records(open_records(&input.to_string_lossy()).unwrap()).unwrap();
        assert_eq!(records.len(), 2);

        let report = parse_batch(
            &records,
            &Case::new("c1", "c1"),
            &VariantParser::default(),
            &LogSink,
        );
        let output_path = output.to_string_lossy().to_string();
        write_variants(create_output(Some(&output_path)).unwrap(), &report.variants).unwrap();

        let raw = std::fs::read(&output).unwrap();
        let mut text = String::new();
        if output_name.ends_with(".gz") {
            assert_eq!(&raw[..2], &[0x1f, 0x8b]);
            MultiGzDecoder::new(raw.as_slice())
                .read_to_string(&mut text)
                .unwrap();
        } else {
            text = String::from_utf8(raw).unwrap();
        }

        let documents: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["sub_category"], "snv");
        assert_eq!(documents[1]["sub_category"], "del");
        assert_eq!(documents[1]["end"], 650);
    }

    #[rstest]
    fn test_missing_records_file() {
        let err = open_records("does/not/exist.jsonl.gz").err().unwrap();
        assert!(err.to_string().contains("does/not/exist.jsonl.gz"));
    }

    #[rstest]
    fn test_bad_record_line() {
        let err = read_records("{\"CHROM\": 1}\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
