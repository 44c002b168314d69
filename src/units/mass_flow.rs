use serde::{Deserialize, Serialize};

/// 질량유량 단위. 내부 기준은 kg/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassFlowUnit {
    KgPerSecond,
    KgPerHour,
    TonnePerHour,
    PoundPerHour,
}

const SECONDS_PER_HOUR: f64 = 3600.0;

/// 질량유량을 kg/s로 변환한다.
pub fn to_kg_per_s(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KgPerSecond => value,
        MassFlowUnit::KgPerHour => value / SECONDS_PER_HOUR,
        MassFlowUnit::TonnePerHour => value * 1000.0 / SECONDS_PER_HOUR,
        MassFlowUnit::PoundPerHour => value * 0.453_592 / SECONDS_PER_HOUR,
    }
}

/// kg/s → kg/h
pub fn kg_per_s_to_kg_per_h(value_kg_s: f64) -> f64 {
    value_kg_s * SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tonne_per_hour() {
        let kg_s = to_kg_per_s(3.6, MassFlowUnit::TonnePerHour);
        assert!((kg_s - 1.0).abs() < 1e-12);
        assert!((kg_per_s_to_kg_per_h(kg_s) - 3600.0).abs() < 1e-9);
    }
}
