use serde::{Deserialize, Serialize};

/// Reaction class of a single process step. Each class carries a fixed
/// one-time feasibility fee [INR], charged before the volume discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionType {
    /// Liquid-Liquid (L-L)
    LiquidLiquid,
    /// Liquid-Liquid with catalyst (L-L+C)
    LiquidLiquidCatalyst,
    /// Liquid-Gas (L-G)
    LiquidGas,
    /// Gas-Gas (G-G)
    GasGas,
}

impl ReactionType {
    /// Short label as shown on the wizard and in reports.
    pub fn label(self) -> &'static str {
        match self {
            ReactionType::LiquidLiquid => "L-L",
            ReactionType::LiquidLiquidCatalyst => "L-L+C",
            ReactionType::LiquidGas => "L-G",
            ReactionType::GasGas => "G-G",
        }
    }
}

/// Parses a reaction-type label. Unrecognized labels mean "not selected"
/// and contribute zero feasibility cost.
pub fn parse_reaction_type(s: &str) -> Option<ReactionType> {
    match s.trim().to_uppercase().as_str() {
        "L-L" | "LL" => Some(ReactionType::LiquidLiquid),
        "L-L+C" | "LL+C" | "LLC" => Some(ReactionType::LiquidLiquidCatalyst),
        "L-G" | "LG" => Some(ReactionType::LiquidGas),
        "G-G" | "GG" => Some(ReactionType::GasGas),
        _ => None,
    }
}

/// Commercial parameters of the FaaS offer.
///
/// These are business inputs, not derived values. The defaults reproduce the
/// published offer; config.toml can override any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostModel {
    /// Flow-route KSM cost as a fraction of the current batch cost.
    pub batch_cost_ratio: f64,
    /// Feasibility fee per L-L step [INR]
    pub feasibility_ll_inr: f64,
    /// Feasibility fee per L-L+C step [INR]
    pub feasibility_llc_inr: f64,
    /// Feasibility fee per L-G step [INR]
    pub feasibility_lg_inr: f64,
    /// Feasibility fee per G-G step [INR]
    pub feasibility_gg_inr: f64,
    /// Feasibility discount for a 2-step process (fraction)
    pub discount_2_steps: f64,
    /// Feasibility discount for a 3-step process (fraction)
    pub discount_3_steps: f64,
    /// Feasibility discount for a 4-step process (fraction)
    pub discount_4_steps: f64,
    /// Deposit multiplier up to 10 tons/month inclusive
    pub multiplier_upto_10_tons: f64,
    /// Deposit multiplier up to 20 tons/month inclusive
    pub multiplier_upto_20_tons: f64,
    /// Deposit multiplier up to 30 tons/month inclusive
    pub multiplier_upto_30_tons: f64,
    /// Deposit multiplier up to 40 tons/month inclusive
    pub multiplier_upto_40_tons: f64,
    /// Deposit multiplier above 40 tons/month
    pub multiplier_above_40_tons: f64,
    /// Annual interest rate imputed on the refundable deposit (fraction)
    pub deposit_interest_rate: f64,
    /// Deposit holding term [years]
    pub deposit_term_years: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            batch_cost_ratio: 0.7,
            feasibility_ll_inr: 400_000.0,
            feasibility_llc_inr: 550_000.0,
            feasibility_lg_inr: 750_000.0,
            feasibility_gg_inr: 900_000.0,
            discount_2_steps: 0.07,
            discount_3_steps: 0.11,
            discount_4_steps: 0.15,
            multiplier_upto_10_tons: 2.0,
            multiplier_upto_20_tons: 2.5,
            multiplier_upto_30_tons: 3.0,
            multiplier_upto_40_tons: 4.0,
            multiplier_above_40_tons: 5.0,
            deposit_interest_rate: 0.12,
            deposit_term_years: 3,
        }
    }
}

impl CostModel {
    /// Feasibility fee for one process step of the given reaction class [INR].
    pub fn feasibility_fee_inr(&self, reaction: ReactionType) -> f64 {
        match reaction {
            ReactionType::LiquidLiquid => self.feasibility_ll_inr,
            ReactionType::LiquidLiquidCatalyst => self.feasibility_llc_inr,
            ReactionType::LiquidGas => self.feasibility_lg_inr,
            ReactionType::GasGas => self.feasibility_gg_inr,
        }
    }

    /// Feasibility discount rate by process step count.
    pub fn step_discount_rate(&self, num_process_steps: u8) -> f64 {
        match num_process_steps {
            2 => self.discount_2_steps,
            3 => self.discount_3_steps,
            4 => self.discount_4_steps,
            _ => 0.0,
        }
    }

    /// Deposit multiplier by monthly volume. Tier boundaries are inclusive,
    /// so exactly 10 tons/month still takes the lowest multiplier.
    pub fn volume_multiplier(&self, volume_tons_per_month: f64) -> f64 {
        let vol = if volume_tons_per_month > 0.0 {
            volume_tons_per_month
        } else {
            1.0
        };
        if vol <= 10.0 {
            self.multiplier_upto_10_tons
        } else if vol <= 20.0 {
            self.multiplier_upto_20_tons
        } else if vol <= 30.0 {
            self.multiplier_upto_30_tons
        } else if vol <= 40.0 {
            self.multiplier_upto_40_tons
        } else {
            self.multiplier_above_40_tons
        }
    }
}

/// Wizard inputs for one ROI analysis. Currency is deliberately absent:
/// the whole pipeline runs in INR and conversion is a display concern.
#[derive(Debug, Clone)]
pub struct RoiInput {
    /// Number of process steps (1-4)
    pub num_process_steps: u8,
    /// Reaction class per step. Entries at index >= `num_process_steps`
    /// are ignored; `None` means not selected (zero fee).
    pub reactions: [Option<ReactionType>; 4],
    /// Monthly production volume [tons]
    pub volume_tons_per_month: f64,
    /// Current batch KSM cost [INR/kg]
    pub ksm_cost_per_kg_inr: f64,
    /// FaaS fee as a share of the per-kg savings [%], 40-60
    pub faas_fee_percent: u8,
}

/// Derived financial figures, all in INR.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiOutput {
    /// Annual production volume [tons]
    pub annual_volume_tons: f64,
    /// Flownetics flow-route KSM cost [INR/kg]
    pub flownetics_cost_per_kg_inr: f64,
    /// Raw-material savings [INR/kg]
    pub savings_per_kg_inr: f64,
    /// FaaS fee [INR/kg]
    pub faas_fee_per_kg_inr: f64,
    /// Raw-material savings [INR/year]
    pub annual_savings_inr: f64,
    /// FaaS fees [INR/year]
    pub annual_faas_fees_inr: f64,
    /// Savings net of FaaS fees [INR/year]
    pub net_annual_savings_inr: f64,
    /// Sum of per-step feasibility fees before discount [INR]
    pub total_feasibility_cost_inr: f64,
    /// Feasibility discount applied for the step count (fraction)
    pub step_discount_rate: f64,
    /// Part A: discounted feasibility cost [INR]
    pub part_a_inr: f64,
    /// Parts B+C: scale-up and commissioning, priced at 2x Part A [INR]
    pub part_bc_inr: f64,
    /// Deposit multiplier selected for the monthly volume
    pub volume_multiplier: f64,
    /// Refundable deposit [INR]
    pub refundable_deposit_inr: f64,
    /// Imputed interest on the deposit over the holding term [INR]
    pub deposit_interest_inr: f64,
    /// Total client cost: Part A + Parts B/C + deposit interest [INR]
    pub total_client_cost_inr: f64,
    /// Months to break even. 0.0 is the sentinel for "undefined"
    /// (no positive net savings); never NaN or infinite.
    pub roi_months: f64,
}

/// Validation failure for one wizard field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoiInputError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl std::fmt::Display for RoiInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for RoiInputError {}

fn validate(input: &RoiInput) -> Result<(), RoiInputError> {
    if !(1..=4).contains(&input.num_process_steps) {
        return Err(RoiInputError {
            field: "num_process_steps",
            reason: "must be between 1 and 4",
        });
    }
    if !(input.volume_tons_per_month > 0.0) || !input.volume_tons_per_month.is_finite() {
        return Err(RoiInputError {
            field: "volume_tons_per_month",
            reason: "must be a positive number",
        });
    }
    if !(input.ksm_cost_per_kg_inr > 0.0) || !input.ksm_cost_per_kg_inr.is_finite() {
        return Err(RoiInputError {
            field: "ksm_cost_per_kg_inr",
            reason: "must be a positive number",
        });
    }
    if !(40..=60).contains(&input.faas_fee_percent) {
        return Err(RoiInputError {
            field: "faas_fee_percent",
            reason: "must be between 40 and 60",
        });
    }
    Ok(())
}

/// Computes the full ROI breakdown for one set of wizard inputs.
///
/// Pure and deterministic: identical inputs give bit-identical outputs.
/// No rounding happens inside the pipeline; formatting rounds at display
/// time only, so `net_annual_savings_inr` is exactly
/// `annual_savings_inr - annual_faas_fees_inr`.
pub fn compute(input: &RoiInput, model: &CostModel) -> Result<RoiOutput, RoiInputError> {
    validate(input)?;

    let annual_volume_tons = input.volume_tons_per_month * 12.0;

    let flownetics_cost_per_kg_inr = input.ksm_cost_per_kg_inr * model.batch_cost_ratio;
    let savings_per_kg_inr = input.ksm_cost_per_kg_inr - flownetics_cost_per_kg_inr;
    let faas_fee_per_kg_inr = savings_per_kg_inr * f64::from(input.faas_fee_percent) / 100.0;

    // tons -> kg
    let annual_savings_inr = savings_per_kg_inr * annual_volume_tons * 1000.0;
    let annual_faas_fees_inr = faas_fee_per_kg_inr * annual_volume_tons * 1000.0;
    let net_annual_savings_inr = annual_savings_inr - annual_faas_fees_inr;

    let total_feasibility_cost_inr: f64 = input.reactions
        [..usize::from(input.num_process_steps)]
        .iter()
        .flatten()
        .map(|r| model.feasibility_fee_inr(*r))
        .sum();

    let step_discount_rate = model.step_discount_rate(input.num_process_steps);
    let part_a_inr = total_feasibility_cost_inr * (1.0 - step_discount_rate);
    let part_bc_inr = part_a_inr * 2.0;

    let volume_multiplier = model.volume_multiplier(input.volume_tons_per_month);
    let refundable_deposit_inr = part_bc_inr * volume_multiplier;
    let growth = (1.0 + model.deposit_interest_rate).powi(model.deposit_term_years as i32);
    let deposit_interest_inr = refundable_deposit_inr * (growth - 1.0);
    let total_client_cost_inr = part_a_inr + part_bc_inr + deposit_interest_inr;

    let roi_months = if net_annual_savings_inr > 0.0 && total_client_cost_inr > 0.0 {
        total_client_cost_inr / net_annual_savings_inr * 12.0
    } else {
        0.0
    };

    Ok(RoiOutput {
        annual_volume_tons,
        flownetics_cost_per_kg_inr,
        savings_per_kg_inr,
        faas_fee_per_kg_inr,
        annual_savings_inr,
        annual_faas_fees_inr,
        net_annual_savings_inr,
        total_feasibility_cost_inr,
        step_discount_rate,
        part_a_inr,
        part_bc_inr,
        volume_multiplier,
        refundable_deposit_inr,
        deposit_interest_inr,
        total_client_cost_inr,
        roi_months,
    })
}
