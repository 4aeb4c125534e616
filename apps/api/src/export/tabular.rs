use crate::export::label::percent;
use crate::export::{ExportBundle, ExportError};
use crate::normalize::SubScore;

/// One `Metric,Value` row per headline figure. Scores are integer percentages.
pub fn render_summary(bundle: &ExportBundle) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Metric", "Value"])?;
    writer.write_record(["Overall Score", percent(bundle.score.overall).to_string().as_str()])?;
    for sub in SubScore::ALL {
        writer.write_record([sub.label(), percent(bundle.score.get(sub)).to_string().as_str()])?;
    }
    writer.write_record(["Candidate Name", bundle.candidate.name.as_str()])?;
    writer.write_record(["Job Title", bundle.job.title.as_str()])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::bundle::fixtures;

    fn rows(text: &str) -> Vec<(String, String)> {
        csv::Reader::from_reader(text.as_bytes())
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].to_string())
            })
            .collect()
    }

    #[test]
    fn test_summary_rows() {
        let text = render_summary(&fixtures::bundle()).unwrap();
        assert!(text.starts_with("Metric,Value\n"));
        assert_eq!(
            rows(&text),
            vec![
                ("Overall Score".to_string(), "82".to_string()),
                ("Skills Match".to_string(), "90".to_string()),
                ("Experience".to_string(), "70".to_string()),
                ("Education".to_string(), "0".to_string()),
                ("Languages".to_string(), "0".to_string()),
                ("Candidate Name".to_string(), "Grace Hopper".to_string()),
                ("Job Title".to_string(), "Compiler Engineer".to_string()),
            ]
        );
    }

    #[test]
    fn test_half_up_rounding_in_rows() {
        let mut bundle = fixtures::bundle();
        bundle.score.skills = 0.595;
        let text = render_summary(&bundle).unwrap();
        assert!(text.contains("Skills Match,60\n"));
    }

    #[test]
    fn test_delimiters_and_quotes_are_escaped() {
        let mut bundle = fixtures::bundle();
        bundle.candidate.name = "Hopper, Grace \"Amazing\"".to_string();
        bundle.job.title = "Engineer\nLead".to_string();

        let text = render_summary(&bundle).unwrap();
        assert!(text.contains("\"Hopper, Grace \"\"Amazing\"\"\""));

        let rows = rows(&text);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[5].1, "Hopper, Grace \"Amazing\"");
        assert_eq!(rows[6], ("Job Title".to_string(), "Engineer\nLead".to_string()));
    }

    #[test]
    fn test_empty_bundle_still_has_every_row() {
        let rows = rows(&render_summary(&ExportBundle::default()).unwrap());
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[5], ("Candidate Name".to_string(), String::new()));
    }
}
