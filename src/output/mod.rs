use crate::clinical::{ClinicalStatus, CrowdingWarning};
use crate::error::PKResult;
use crate::models::{Compound, Metabolism, SubjectProfile};
use crate::simulation::{ActivityComparison, CohortMember, CohortSummary, ExposureSummary, SimulationResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use log::info;

/// Everything written to `summary.json` for one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary<'a> {
    pub generated_at: DateTime<Utc>,
    pub subject: &'a SubjectProfile,
    pub compounds: Vec<&'a str>,
    pub selected_compound: Option<&'a str>,
    pub exposure: ExposureSummary,
    pub status_time: Option<f64>,
    pub status: Option<ClinicalStatus>,
    pub crowding: Option<String>,
}

impl<'a> RunSummary<'a> {
    pub fn new(
        subject: &'a SubjectProfile,
        compounds: &'a [Compound],
        selected: Option<&'a Compound>,
        results: &[SimulationResult],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            subject,
            compounds: compounds.iter().map(|c| c.id.as_str()).collect(),
            selected_compound: selected.map(|c| c.id.as_str()),
            exposure: ExposureSummary::from_results(results),
            status_time: None,
            status: None,
            crowding: None,
        }
    }

    pub fn with_status(mut self, time: f64, status: Option<ClinicalStatus>) -> Self {
        self.status_time = Some(time);
        self.status = status;
        self
    }

    pub fn with_crowding(mut self, warning: Option<CrowdingWarning>) -> Self {
        self.crowding = warning.map(|w| w.to_string());
        self
    }
}

pub fn save_results<P: AsRef<Path>>(
    results: &[SimulationResult],
    summary: &RunSummary<'_>,
    output_dir: P,
) -> PKResult<()> {
    let output_path = output_dir.as_ref();

    save_concentration_data(results, output_path.join("concentrations.csv"))?;
    save_json(summary, output_path.join("summary.json"))?;
    generate_report(summary, results, output_path)?;

    info!("Simulation results saved to {:?}", output_path);
    Ok(())
}

pub fn save_concentration_data<P: AsRef<Path>>(results: &[SimulationResult], path: P) -> PKResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["TIME".to_string(), "CONCENTRATION".to_string(), "IS_TOXIC".to_string()];
    header.extend(Metabolism::ALL.iter().map(|m| m.as_str().to_uppercase()));
    writer.write_record(&header)?;

    for result in results {
        let mut record = vec![
            result.time.to_string(),
            result.concentration.to_string(),
            result.is_toxic.to_string(),
        ];
        record.extend(result.organ_loads.iter().map(|(_, load)| load.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn save_activity_comparison<P: AsRef<Path>>(rows: &[ActivityComparison], path: P) -> PKResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["TIME", "SEDENTARY", "NORMAL", "HYPER_METABOLIC"])?;
    for row in rows {
        writer.write_record(&[
            row.time.to_string(),
            row.sedentary.to_string(),
            row.normal.to_string(),
            row.hyper_metabolic.to_string(),
        ])?;
    }

    writer.flush()?;
    info!("Activity comparison saved");
    Ok(())
}

pub fn save_cohort<P: AsRef<Path>>(members: &[CohortMember], output_dir: P) -> PKResult<()> {
    let output_path = output_dir.as_ref();
    let mut writer = csv::Writer::from_path(output_path.join("cohort.csv"))?;

    writer.write_record(["MEMBER_ID", "WEIGHT", "AGE", "CMAX", "AUC", "TMAX", "TOXIC_SAMPLES"])?;
    for member in members {
        writer.write_record(&[
            member.member_id.to_string(),
            member.subject.weight.to_string(),
            member.subject.age.to_string(),
            member.exposure.cmax.to_string(),
            member.exposure.auc.to_string(),
            member.exposure.tmax.unwrap_or(0.0).to_string(),
            member.exposure.toxic_samples.to_string(),
        ])?;
    }
    writer.flush()?;

    save_json(&CohortSummary::from_members(members), output_path.join("cohort_summary.json"))?;
    info!("Cohort results saved to {:?}", output_path);
    Ok(())
}

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> PKResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Human-readable Markdown report of one run.
pub fn render_report(summary: &RunSummary<'_>, results: &[SimulationResult]) -> String {
    let exposure = &summary.exposure;
    let grid = match (results.first(), results.last()) {
        (Some(first), Some(last)) => format!("{} points, {}h to {}h", results.len(), first.time, last.time),
        _ => "empty".to_string(),
    };

    let mut organ_rows = String::new();
    for (pathway, load) in exposure.peak_organ_loads.iter() {
        organ_rows.push_str(&format!("| {} | {:.0}% |\n", pathway, load));
    }

    let status = match &summary.status {
        Some(status) => format!(
            "- **Time**: {}h\n- **Phase**: {}\n- **Severity**: {:?}\n- **Message**: {}",
            summary.status_time.unwrap_or(0.0),
            status.phase,
            status.severity,
            status.message
        ),
        None => "- Not requested".to_string(),
    };

    format!(
        r#"# Plasma Concentration Simulation Report

Generated {}

## Subject
- **Age**: {} years
- **Weight**: {} kg
- **Activity level**: {} ({})

## Protocol
- **Compounds**: {}
- **Grid**: {}

## Exposure
- **Cmax**: {:.3} mg/L
- **Tmax**: {}
- **AUC**: {:.3} mg*h/L
- **Toxic samples**: {}
- **First toxic time**: {}

## Peak Organ Load
| Pathway | Load |
|---|---|
{}
## Clinical Status
{}

## Interactions
{}

## Files Generated
- `concentrations.csv`: Concentration, toxicity flag and organ loads per time point
- `summary.json`: Exposure endpoints and status readout

## Notes
Illustrative one-compartment simulation. Not a medical device.
"#,
        summary.generated_at.to_rfc3339(),
        summary.subject.age,
        summary.subject.weight,
        u8::from(summary.subject.activity_level),
        summary.subject.activity_level.label(),
        summary.compounds.join(", "),
        grid,
        exposure.cmax,
        exposure.tmax.map_or("n/a".to_string(), |t| format!("{:.2} h", t)),
        exposure.auc,
        exposure.toxic_samples,
        exposure.first_toxic_time.map_or("none".to_string(), |t| format!("{:.2} h", t)),
        organ_rows,
        status,
        summary.crowding.as_deref().unwrap_or("No shared clearance pathways."),
    )
}

pub fn generate_report<P: AsRef<Path>>(
    summary: &RunSummary<'_>,
    results: &[SimulationResult],
    output_dir: P,
) -> PKResult<()> {
    let report_path = output_dir.as_ref().join("simulation_report.md");
    std::fs::write(report_path, render_report(summary, results))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::clinical::{metabolic_crowding, status_at};
    use crate::dosing::Dose;
    use crate::simulation::{simulate, TimeGrid};

    fn run() -> (SubjectProfile, Vec<Compound>, Vec<SimulationResult>) {
        let subject = SubjectProfile::default();
        let compounds = vec![
            catalog::find("paracetamol").unwrap().clone(),
            catalog::find("sertraline").unwrap().clone(),
        ];
        let doses = vec![Dose::with_id("a", "paracetamol", 0.0, 500.0)];
        let results = simulate(TimeGrid::default().points(), &doses, &compounds, &subject);
        (subject, compounds, results)
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("physio_trace_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_report_contents() {
        let (subject, compounds, results) = run();
        let status = status_at(&results, 12.0, compounds[0].toxicity_threshold_mg_l);
        let summary = RunSummary::new(&subject, &compounds, compounds.first(), &results)
            .with_status(12.0, status)
            .with_crowding(metabolic_crowding(&compounds));

        let report = render_report(&summary, &results);
        assert!(report.contains("paracetamol, sertraline"));
        assert!(report.contains("97 points, 0h to 24h"));
        assert!(report.contains("| hepatic |"));
        assert!(report.contains("competing for hepatic clearance pathway"));
        assert!(report.contains("**Phase**: Elimination"));
    }

    #[test]
    fn test_save_results_writes_files() {
        let (subject, compounds, results) = run();
        let summary = RunSummary::new(&subject, &compounds, compounds.first(), &results);
        let dir = scratch_dir("results");

        save_results(&results, &summary, &dir).unwrap();

        let mut reader = csv::Reader::from_path(dir.join("concentrations.csv")).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 8);
        assert_eq!(&headers[3], "HEPATIC");
        assert_eq!(reader.records().count(), 97);

        let json: serde_json::Value =
            serde_json::from_reader(File::open(dir.join("summary.json")).unwrap()).unwrap();
        assert_eq!(json["selectedCompound"], "paracetamol");
        assert!(json["exposure"]["cmax"].as_f64().unwrap() > 0.0);

        assert!(dir.join("simulation_report.md").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
