//! Built-in reference catalog.
//!
//! Parsed once by [`super::ContentCatalog::builtin`].  Deployments that own
//! their own content replace it wholesale with a YAML file of the same shape.

/// The default catalog shipped with the crate.
pub const BUILTIN_CATALOG_YAML: &str = r#"catalog:
  version: "1.0.0"

  # Per-slot multipliers.  The two orientation questions count double.
  slot_weights: [2.0, 2.0, 1.5, 1.5, 1.5, 1.5, 1.0, 1.0, 1.0]

  slots:
    - label: "center of attention"
      choices:
        - {5: 1.0, 6: 1.0, 7: 1.0}
        - {2: 1.0, 3: 1.0, 4: 1.0}
        - {8: 1.0, 9: 1.0, 1: 1.0}
    - label: "social stance"
      choices:
        - {3: 1.0, 7: 1.0, 8: 1.0}
        - {1: 1.0, 2: 1.0, 6: 1.0}
        - {4: 1.0, 5: 1.0, 9: 1.0}
    - label: "response to difficulty"
      choices:
        - {2: 1.0, 7: 1.0, 9: 1.0}
        - {1: 1.0, 3: 1.0, 5: 1.0}
        - {4: 1.0, 6: 1.0, 8: 1.0}
    - label: "relational pattern"
      choices:
        - {3: 0.8, 6: 0.8, 9: 0.8}
        - {1: 0.8, 4: 0.8, 7: 0.8}
        - {2: 0.8, 5: 0.8, 8: 0.8}
    - label: "core drive"
      choices:
        - {1: 1.0, 6: 0.5}
        - {2: 1.0, 9: 0.5}
        - {3: 1.0, 8: 0.5}
    - label: "inner orientation"
      choices:
        - {4: 1.0, 2: 0.3}
        - {5: 1.0, 1: 0.3}
        - {6: 1.0, 3: 0.3}
    - label: "energy"
      choices:
        - {7: 1.0, 3: 0.4}
        - {8: 1.0, 1: 0.4}
        - {9: 1.0, 2: 0.4}
    - label: "under pressure"
      choices:
        - {1: 0.8, 6: 0.5, 8: 0.3}
        - {5: 0.8, 9: 0.5, 4: 0.3}
        - {3: 0.8, 7: 0.5, 8: 0.3}
    - label: "natural gift"
      choices:
        - {2: 0.8, 9: 0.5}
        - {4: 0.8, 5: 0.5}
        - {3: 0.8, 7: 0.5, 8: 0.3}

  wings:
    1: [9, 2]
    2: [1, 3]
    3: [2, 4]
    4: [3, 5]
    5: [4, 6]
    6: [5, 7]
    7: [6, 8]
    8: [7, 9]
    9: [8, 1]

  arrows:
    1: {integration: 7, disintegration: 4}
    2: {integration: 4, disintegration: 8}
    3: {integration: 6, disintegration: 9}
    4: {integration: 1, disintegration: 2}
    5: {integration: 8, disintegration: 7}
    6: {integration: 9, disintegration: 3}
    7: {integration: 5, disintegration: 1}
    8: {integration: 2, disintegration: 5}
    9: {integration: 3, disintegration: 6}

  states:
    - name: "Peak"
      activation: 90
      description: "You operate from security and openness, with energy directed toward growth and generosity."
    - name: "Healthy"
      activation: 70
      description: "You are generally stable and productive; habitual patterns are present but manageable."
    - name: "Average"
      activation: 50
      description: "You function adequately, though defensive habits increasingly shape your reactions."
    - name: "Stressed"
      activation: 30
      description: "Stress sets the tone; reactions become rigid and energy goes into self-protection."
    - name: "Crisis"
      activation: 10
      description: "You are in survival mode; resources are exhausted and old patterns run unchecked."
"#;
