use flownetics_roi_toolbox::roi::{
    compute, parse_reaction_type, CostModel, ReactionType, RoiInput,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn reference_input() -> RoiInput {
    RoiInput {
        num_process_steps: 1,
        reactions: [Some(ReactionType::LiquidLiquid), None, None, None],
        volume_tons_per_month: 10.0,
        ksm_cost_per_kg_inr: 5000.0,
        faas_fee_percent: 50,
    }
}

#[test]
fn reference_scenario_full_breakdown() {
    // 1 step L-L, 10 tons/month, 5000 INR/kg KSM, 50% FaaS fee
    let out = compute(&reference_input(), &CostModel::default()).expect("valid input");

    assert_close("annual_volume", out.annual_volume_tons, 120.0, 1e-12);
    assert_close("flownetics_kg", out.flownetics_cost_per_kg_inr, 3500.0, 1e-12);
    assert_close("savings_kg", out.savings_per_kg_inr, 1500.0, 1e-12);
    assert_close("faas_kg", out.faas_fee_per_kg_inr, 750.0, 1e-12);
    assert_close("annual_savings", out.annual_savings_inr, 180_000_000.0, 1e-12);
    assert_close("annual_faas", out.annual_faas_fees_inr, 90_000_000.0, 1e-12);
    assert_close("net_savings", out.net_annual_savings_inr, 90_000_000.0, 1e-12);
    assert_close("feasibility", out.total_feasibility_cost_inr, 400_000.0, 1e-12);
    assert_close("discount", out.step_discount_rate, 0.0, 1e-12);
    assert_close("part_a", out.part_a_inr, 400_000.0, 1e-12);
    assert_close("part_bc", out.part_bc_inr, 800_000.0, 1e-12);
    assert_close("multiplier", out.volume_multiplier, 2.0, 1e-12);
    assert_close("deposit", out.refundable_deposit_inr, 1_600_000.0, 1e-12);
    // 1.12^3 - 1 = 0.404928
    assert_close("interest", out.deposit_interest_inr, 647_884.8, 1e-9);
    assert_close("total_cost", out.total_client_cost_inr, 1_847_884.8, 1e-9);
    assert_close("roi_months", out.roi_months, 0.246_384_64, 1e-8);
}

#[test]
fn volume_multiplier_tiers_are_inclusive() {
    let model = CostModel::default();
    let mut input = reference_input();

    input.volume_tons_per_month = 10.0;
    let at_tier = compute(&input, &model).unwrap();
    assert_close("at 10 tons", at_tier.volume_multiplier, 2.0, 1e-12);

    input.volume_tons_per_month = 10.0001;
    let above_tier = compute(&input, &model).unwrap();
    assert_close("above 10 tons", above_tier.volume_multiplier, 2.5, 1e-12);

    input.volume_tons_per_month = 40.0;
    assert_close(
        "at 40 tons",
        compute(&input, &model).unwrap().volume_multiplier,
        4.0,
        1e-12,
    );
    input.volume_tons_per_month = 55.0;
    assert_close(
        "above 40 tons",
        compute(&input, &model).unwrap().volume_multiplier,
        5.0,
        1e-12,
    );
}

#[test]
fn four_gas_gas_steps_take_full_discount() {
    let input = RoiInput {
        num_process_steps: 4,
        reactions: [Some(ReactionType::GasGas); 4],
        volume_tons_per_month: 10.0,
        ksm_cost_per_kg_inr: 5000.0,
        faas_fee_percent: 50,
    };
    let out = compute(&input, &CostModel::default()).unwrap();
    assert_close("feasibility", out.total_feasibility_cost_inr, 3_600_000.0, 1e-12);
    assert_close("discount", out.step_discount_rate, 0.15, 1e-12);
    assert_close("part_a", out.part_a_inr, 3_060_000.0, 1e-9);
    assert_close("part_bc", out.part_bc_inr, 6_120_000.0, 1e-9);
}

#[test]
fn reaction_slots_beyond_step_count_are_ignored() {
    let input = RoiInput {
        num_process_steps: 1,
        reactions: [
            Some(ReactionType::LiquidLiquid),
            Some(ReactionType::GasGas),
            Some(ReactionType::GasGas),
            Some(ReactionType::GasGas),
        ],
        volume_tons_per_month: 10.0,
        ksm_cost_per_kg_inr: 5000.0,
        faas_fee_percent: 50,
    };
    let out = compute(&input, &CostModel::default()).unwrap();
    assert_close("feasibility", out.total_feasibility_cost_inr, 400_000.0, 1e-12);
}

#[test]
fn unselected_steps_contribute_zero_cost() {
    let input = RoiInput {
        num_process_steps: 3,
        reactions: [Some(ReactionType::LiquidGas), None, None, None],
        volume_tons_per_month: 10.0,
        ksm_cost_per_kg_inr: 5000.0,
        faas_fee_percent: 50,
    };
    let out = compute(&input, &CostModel::default()).unwrap();
    assert_close("feasibility", out.total_feasibility_cost_inr, 750_000.0, 1e-12);
    // 3-step discount still applies to whatever was selected
    assert_close("discount", out.step_discount_rate, 0.11, 1e-12);
}

#[test]
fn compute_is_deterministic() {
    let model = CostModel::default();
    let input = reference_input();
    assert_eq!(
        compute(&input, &model).unwrap(),
        compute(&input, &model).unwrap()
    );
}

#[test]
fn savings_grow_with_ksm_cost() {
    let model = CostModel::default();
    let mut input = reference_input();
    let low = compute(&input, &model).unwrap();
    input.ksm_cost_per_kg_inr = 6000.0;
    let high = compute(&input, &model).unwrap();
    assert!(high.savings_per_kg_inr >= low.savings_per_kg_inr);
    assert!(high.annual_savings_inr >= low.annual_savings_inr);
}

#[test]
fn net_savings_identity_holds_exactly() {
    let model = CostModel::default();
    for faas in [40u8, 47, 50, 60] {
        for volume in [0.5, 10.0, 25.0, 99.0] {
            let input = RoiInput {
                num_process_steps: 2,
                reactions: [
                    Some(ReactionType::LiquidLiquid),
                    Some(ReactionType::LiquidGas),
                    None,
                    None,
                ],
                volume_tons_per_month: volume,
                ksm_cost_per_kg_inr: 4321.0,
                faas_fee_percent: faas,
            };
            let out = compute(&input, &model).unwrap();
            // bit-exact, not approximately equal
            assert_eq!(
                out.net_annual_savings_inr,
                out.annual_savings_inr - out.annual_faas_fees_inr
            );
        }
    }
}

#[test]
fn monetary_outputs_are_non_negative() {
    let model = CostModel::default();
    for steps in 1u8..=4 {
        for volume in [0.1, 10.0, 20.0, 35.0, 80.0] {
            let input = RoiInput {
                num_process_steps: steps,
                reactions: [Some(ReactionType::LiquidLiquidCatalyst); 4],
                volume_tons_per_month: volume,
                ksm_cost_per_kg_inr: 1234.0,
                faas_fee_percent: 45,
            };
            let out = compute(&input, &model).unwrap();
            assert!(out.annual_savings_inr >= 0.0);
            assert!(out.part_a_inr >= 0.0);
            assert!(out.part_bc_inr >= 0.0);
            assert!(out.refundable_deposit_inr >= 0.0);
            assert!(out.total_client_cost_inr >= 0.0);
            assert!(out.roi_months >= 0.0);
        }
    }
}

#[test]
fn zero_net_savings_yields_sentinel_not_nan() {
    // A cost model with no flow-route advantage: zero savings, zero net.
    let model = CostModel {
        batch_cost_ratio: 1.0,
        ..CostModel::default()
    };
    let out = compute(&reference_input(), &model).unwrap();
    assert_eq!(out.net_annual_savings_inr, 0.0);
    assert_eq!(out.roi_months, 0.0);
    assert!(out.roi_months.is_finite());
}

#[test]
fn cost_model_overrides_are_respected() {
    let model = CostModel {
        deposit_interest_rate: 0.10,
        deposit_term_years: 1,
        ..CostModel::default()
    };
    let out = compute(&reference_input(), &model).unwrap();
    // one year at 10%: interest is exactly a tenth of the deposit
    assert_close(
        "interest",
        out.deposit_interest_inr,
        out.refundable_deposit_inr * 0.10,
        1e-9,
    );
}

#[test]
fn out_of_range_inputs_are_rejected() {
    let model = CostModel::default();

    let mut input = reference_input();
    input.num_process_steps = 0;
    assert_eq!(
        compute(&input, &model).unwrap_err().field,
        "num_process_steps"
    );
    input.num_process_steps = 5;
    assert_eq!(
        compute(&input, &model).unwrap_err().field,
        "num_process_steps"
    );

    let mut input = reference_input();
    input.volume_tons_per_month = 0.0;
    assert_eq!(
        compute(&input, &model).unwrap_err().field,
        "volume_tons_per_month"
    );
    input.volume_tons_per_month = -3.0;
    assert_eq!(
        compute(&input, &model).unwrap_err().field,
        "volume_tons_per_month"
    );

    let mut input = reference_input();
    input.ksm_cost_per_kg_inr = 0.0;
    assert_eq!(
        compute(&input, &model).unwrap_err().field,
        "ksm_cost_per_kg_inr"
    );

    let mut input = reference_input();
    input.faas_fee_percent = 39;
    assert_eq!(compute(&input, &model).unwrap_err().field, "faas_fee_percent");
    input.faas_fee_percent = 61;
    assert_eq!(compute(&input, &model).unwrap_err().field, "faas_fee_percent");
}

#[test]
fn reaction_labels_parse_and_unknown_is_unselected() {
    assert_eq!(
        parse_reaction_type("L-L"),
        Some(ReactionType::LiquidLiquid)
    );
    assert_eq!(
        parse_reaction_type("l-l+c"),
        Some(ReactionType::LiquidLiquidCatalyst)
    );
    assert_eq!(parse_reaction_type(" L-G "), Some(ReactionType::LiquidGas));
    assert_eq!(parse_reaction_type("gg"), Some(ReactionType::GasGas));
    assert_eq!(parse_reaction_type("S-L"), None);
    assert_eq!(parse_reaction_type(""), None);
}
