//! The static catalog.
//!
//! Deployed as reference data; editing this file and redeploying is the only
//! way the catalog changes.

use crate::types::{Collection, Level, Material, MaterialKind, Module};

pub(crate) static MODULES: &[Module] = &[
    Module {
        id: "one-on-ones",
        title: "One-on-Ones That Work",
        outcome: "Run one-on-ones your reports actually look forward to",
        description: "A practical walkthrough of structuring recurring one-on-ones: \
                      agendas owned by the report, question banks, and how to surface \
                      problems before they become resignations.",
        topic: "People Management",
        duration_minutes: 45,
        level: Level::Beginner,
        best_for: &["team-lead", "engineering-manager"],
        price: 2900,
        collection_id: "first-90-days",
        materials: &[
            Material {
                id: "one-on-ones-agenda",
                name: "One-on-one agenda template",
                kind: MaterialKind::Template,
            },
            Material {
                id: "one-on-ones-questions",
                name: "50 questions that open people up",
                kind: MaterialKind::Pdf,
            },
        ],
    },
    Module {
        id: "feedback-loops",
        title: "Feedback Without Flinching",
        outcome: "Deliver corrective feedback the same week, not at review time",
        description: "Scripts and framing for timely, specific feedback. Covers the \
                      SBI model, calibrating severity, and following up without \
                      micromanaging.",
        topic: "People Management",
        duration_minutes: 60,
        level: Level::Intermediate,
        best_for: &["team-lead", "engineering-manager", "product-manager"],
        price: 3400,
        collection_id: "first-90-days",
        materials: &[Material {
            id: "feedback-checklist",
            name: "Pre-conversation checklist",
            kind: MaterialKind::Checklist,
        }],
    },
    Module {
        id: "delegation-ladder",
        title: "The Delegation Ladder",
        outcome: "Hand off work without dropping quality",
        description: "Seven levels of delegation, how to pick the right one per task \
                      and person, and the handoff brief that prevents boomerangs.",
        topic: "Execution",
        duration_minutes: 50,
        level: Level::Intermediate,
        best_for: &["engineering-manager", "director"],
        price: 3400,
        collection_id: "scaling-yourself",
        materials: &[
            Material {
                id: "delegation-brief",
                name: "Handoff brief template",
                kind: MaterialKind::Template,
            },
            Material {
                id: "delegation-levels",
                name: "Delegation levels poster",
                kind: MaterialKind::Pdf,
            },
        ],
    },
    Module {
        id: "hiring-bar",
        title: "Holding the Hiring Bar",
        outcome: "Design interview loops that predict on-the-job performance",
        description: "Structured interviewing end to end: rubric design, debrief \
                      facilitation, and the signals that actually correlate with \
                      success six months in.",
        topic: "Hiring",
        duration_minutes: 75,
        level: Level::Advanced,
        best_for: &["engineering-manager", "director", "founder"],
        price: 4900,
        collection_id: "scaling-yourself",
        materials: &[Material {
            id: "hiring-rubric",
            name: "Interview rubric template",
            kind: MaterialKind::Template,
        }],
    },
    Module {
        id: "meeting-diet",
        title: "The Meeting Diet",
        outcome: "Cut your calendar by a third in two weeks",
        description: "An audit method for recurring meetings, defaults for async-first \
                      decisions, and how to kill a meeting without killing alignment.",
        topic: "Execution",
        duration_minutes: 35,
        level: Level::Beginner,
        best_for: &["team-lead", "product-manager"],
        price: 0,
        collection_id: "scaling-yourself",
        materials: &[Material {
            id: "meeting-audit",
            name: "Calendar audit checklist",
            kind: MaterialKind::Checklist,
        }],
    },
    Module {
        id: "difficult-conversations",
        title: "Difficult Conversations, Scripted",
        outcome: "Walk into hard conversations with a plan instead of a knot",
        description: "Performance warnings, comp disappointments, role changes: the \
                      three-part script, rehearsal technique, and legal guardrails to \
                      know before you speak.",
        topic: "People Management",
        duration_minutes: 65,
        level: Level::Advanced,
        best_for: &["engineering-manager", "director", "hr-partner"],
        price: 4900,
        collection_id: "hard-parts",
        materials: &[
            Material {
                id: "conversation-scripts",
                name: "Conversation script pack",
                kind: MaterialKind::Pdf,
            },
            Material {
                id: "conversation-prep",
                name: "Preparation checklist",
                kind: MaterialKind::Checklist,
            },
        ],
    },
];

pub(crate) static COLLECTIONS: &[Collection] = &[
    Collection {
        id: "first-90-days",
        name: "Your First 90 Days",
        description: "The foundations for a brand-new manager: one-on-ones, feedback, \
                      and earning trust fast.",
        module_ids: &["one-on-ones", "feedback-loops"],
    },
    Collection {
        id: "scaling-yourself",
        name: "Scaling Yourself",
        description: "Getting out of the critical path: delegation, hiring, and \
                      reclaiming your calendar.",
        module_ids: &["delegation-ladder", "hiring-bar", "meeting-diet"],
    },
    Collection {
        id: "hard-parts",
        name: "The Hard Parts",
        description: "The conversations nobody enjoys, handled with care.",
        module_ids: &["difficult-conversations"],
    },
];
