//! Recommendation templates
//!
//! Escalation wins over everything: a HIGH band or an out-of-limits ASOG
//! snapshot escalates regardless of the other input. MODERATE intensifies
//! monitoring; LOW and UNKNOWN stay routine.

use crate::types::{ComplianceStatus, RiskLevel};

/// Which recommendation a forecast outcome maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    Escalate,
    IntensifyMonitoring,
    Routine,
}

impl RecommendationKind {
    pub const fn for_outcome(risk: RiskLevel, compliance: ComplianceStatus) -> Self {
        match (risk, compliance) {
            (RiskLevel::High, _) | (_, ComplianceStatus::OutOfLimits) => Self::Escalate,
            (RiskLevel::Moderate, _) => Self::IntensifyMonitoring,
            _ => Self::Routine,
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Escalate => {
                "ESCALATE: Notify the master and technical superintendent immediately. \
                 Review the highest-RPN failure modes and any ASOG parameters outside limits \
                 before continuing the current operation."
            }
            Self::IntensifyMonitoring => {
                "INTENSIFY MONITORING: Increase inspection frequency on the leading failure \
                 modes and confirm mitigation actions are assigned before the next watch."
            }
            Self::Routine => {
                "ROUTINE: Continue the planned maintenance schedule and standard monitoring."
            }
        }
    }
}

/// Recommendation text for a risk band and compliance status.
pub fn recommend(risk: RiskLevel, compliance: ComplianceStatus) -> String {
    RecommendationKind::for_outcome(risk, compliance)
        .text()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RISK: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Unknown,
    ];
    const ALL_COMPLIANCE: [ComplianceStatus; 3] = [
        ComplianceStatus::Compliant,
        ComplianceStatus::OutOfLimits,
        ComplianceStatus::NoData,
    ];

    #[test]
    fn high_risk_always_escalates() {
        for c in ALL_COMPLIANCE {
            assert_eq!(
                RecommendationKind::for_outcome(RiskLevel::High, c),
                RecommendationKind::Escalate
            );
        }
    }

    #[test]
    fn out_of_limits_always_escalates() {
        for r in ALL_RISK {
            assert_eq!(
                RecommendationKind::for_outcome(r, ComplianceStatus::OutOfLimits),
                RecommendationKind::Escalate
            );
        }
    }

    #[test]
    fn moderate_intensifies_unless_out_of_limits() {
        assert_eq!(
            RecommendationKind::for_outcome(RiskLevel::Moderate, ComplianceStatus::Compliant),
            RecommendationKind::IntensifyMonitoring
        );
        assert_eq!(
            RecommendationKind::for_outcome(RiskLevel::Moderate, ComplianceStatus::NoData),
            RecommendationKind::IntensifyMonitoring
        );
    }

    #[test]
    fn low_and_unknown_are_routine() {
        for r in [RiskLevel::Low, RiskLevel::Unknown] {
            for c in [ComplianceStatus::Compliant, ComplianceStatus::NoData] {
                assert_eq!(
                    RecommendationKind::for_outcome(r, c),
                    RecommendationKind::Routine
                );
            }
        }
    }

    #[test]
    fn recommend_is_deterministic() {
        for r in ALL_RISK {
            for c in ALL_COMPLIANCE {
                assert_eq!(recommend(r, c), recommend(r, c));
            }
        }
        assert!(recommend(RiskLevel::High, ComplianceStatus::NoData).starts_with("ESCALATE"));
    }
}
