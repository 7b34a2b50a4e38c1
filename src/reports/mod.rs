use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pillarforge::column::LoadVector;
use pillarforge::config::FixedParameters;
use pillarforge::optimizer::{
    CandidateTrace, CandidateVerdict, EvaluatedCandidate, OptimizationReport, SearchOutcome,
};
use pillarforge::oracle::{FeasibilityStatus, Prediction};

fn status_cell(p: &Prediction) -> Cell {
    let label = if p.overridden {
        format!("{} (override)", p.status)
    } else {
        p.status.to_string()
    };
    match p.status {
        FeasibilityStatus::Feasible if p.overridden => Cell::new(label).fg(Color::Yellow),
        FeasibilityStatus::Feasible => Cell::new(label).fg(Color::Green),
        FeasibilityStatus::Infeasible => Cell::new(label).fg(Color::Red),
    }
}

pub fn print_header(load: &LoadVector, params: &FixedParameters, version: &str, sha: &str) {
    println!("\n=== COLUMN PRE-DIMENSIONING ===");
    println!(
        "Load: N={:.1} kN | Mx={:.1} kN·m | My={:.1} kN·m | L={:.2} m",
        load.axial, load.moment_x, load.moment_y, load.length
    );
    println!(
        "fck={:.0} MPa | concrete {:.2}/m³ | steel {:.2}/kg",
        params.material.fck, params.costs.concrete_price_m3, params.costs.steel_price_kg
    );
    println!("Oracle: {} (sha256 {})", version, sha);
}

pub fn print_ranking(candidates: &[EvaluatedCandidate], limit: usize) {
    if candidates.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("b (cm)"),
        Cell::new("h (cm)"),
        Cell::new("Status"),
        Cell::new("As (cm²)"),
        Cell::new("nu"),
        Cell::new("Concrete"),
        Cell::new("Steel"),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Overridden"),
    ]);

    for i in [0, 1, 2, 4, 5, 6, 7, 8] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, c) in candidates.iter().take(limit).enumerate() {
        let p = &c.prediction;
        let rank_cell = if rank == 0 {
            Cell::new(rank + 1)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(rank + 1)
        };
        table.add_row(vec![
            rank_cell,
            Cell::new(format!("{:.0}", c.section.width)),
            Cell::new(format!("{:.0}", c.section.height)),
            status_cell(p),
            Cell::new(format!("{:.2}", p.steel_area)),
            Cell::new(format!("{:.3}", c.features.nu)),
            Cell::new(format!("{:.2}", c.cost.concrete_cost)),
            Cell::new(format!("{:.2}", c.cost.steel_cost)),
            Cell::new(format!("{:.2}", c.cost.total_cost)).fg(Color::Cyan),
            Cell::new(if p.overridden { "yes" } else { "no" }),
        ]);
    }
    println!("\n{}", table);

    if candidates.len() > limit {
        println!("... {} more candidates not shown", candidates.len() - limit);
    }
}

pub fn print_stats(report: &OptimizationReport) {
    let s = &report.stats;
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Generated"),
        Cell::new("Aspect-rejected"),
        Cell::new("Evaluated"),
        Cell::new("Infeasible"),
        Cell::new("Overridden"),
        Cell::new("Floored"),
        Cell::new("Malformed"),
        Cell::new("Time"),
    ]);
    table.add_row(vec![
        Cell::new(s.generated),
        Cell::new(s.aspect_rejected),
        Cell::new(s.evaluated),
        Cell::new(s.infeasible_rejected),
        Cell::new(s.overridden),
        Cell::new(s.floored),
        Cell::new(s.malformed),
        Cell::new(format!("{:.2?}", s.elapsed)),
    ]);
    println!("\n{}", table);
    if report.truncated {
        println!("⚠️  Search stopped early; the ranking covers a partial grid.");
    }
}

pub fn print_recommendation(report: &OptimizationReport) {
    match &report.outcome {
        SearchOutcome::Optimum(list) => {
            let best = &list[0];
            println!("\n=== 🏆 RECOMMENDATION ===");
            println!(
                "Section: {:.0} x {:.0} cm",
                best.section.width, best.section.height
            );
            println!("As: {:.2} cm²", best.prediction.steel_area);
            println!("Total cost: {:.2}", best.cost.total_cost);
            if best.prediction.overridden {
                println!("Note: approved by the safety override at minimum reinforcement.");
            }
        }
        SearchOutcome::NoFeasibleSection => {
            println!("\n❌ NO FEASIBLE SECTION within the configured bounds.");
        }
    }
}

pub fn print_trace(trace: &CandidateTrace) {
    let (features, prediction, cost) = match &trace.verdict {
        CandidateVerdict::Accepted(c) => (&c.features, &c.prediction, Some(&c.cost)),
        CandidateVerdict::Rejected {
            features,
            prediction,
        } => (features, prediction, None),
    };

    println!(
        "\nSection: {:.0} x {:.0} cm",
        features.section.width, features.section.height
    );

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec!["nu", "mu_x", "mu_y", "lambda_x", "lambda_y", "nu·λ²", "b/h"]);
    table.add_row(vec![
        format!("{:.3}", features.nu),
        format!("{:.3}", features.mu_x),
        format!("{:.3}", features.mu_y),
        format!("{:.1}", features.lambda_x),
        format!("{:.1}", features.lambda_y),
        format!("{:.1}", features.second_order_index),
        format!("{:.2}", features.aspect_ratio),
    ]);
    println!("{}", table);

    println!(
        "Oracle: p={:.3}, As={:.2} cm²",
        trace.raw.probability, trace.raw.steel_area
    );
    if let Some(d) = prediction.defect {
        println!("  malformed response: {}", d);
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Status"),
        Cell::new("As (cm²)"),
        Cell::new("Overridden"),
        Cell::new("Floored"),
    ]);
    table.add_row(vec![
        status_cell(prediction),
        Cell::new(format!("{:.2}", prediction.steel_area)),
        Cell::new(prediction.overridden),
        Cell::new(prediction.floored),
    ]);
    println!("{}", table);

    match cost {
        Some(c) => println!(
            "Cost: concrete {:.2} ({:.3} m³) + steel {:.2} ({:.1} kg) = {:.2}",
            c.concrete_cost, c.concrete_volume, c.steel_cost, c.steel_weight, c.total_cost
        ),
        None => println!("Rejected: section is not feasible."),
    }
}
