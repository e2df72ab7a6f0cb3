//! The editor state store

use super::{EditorPatch, EditorState, StateError};
use crate::preset::{
    BrandPreset, MaterialCustomization, ResolvedMaterial, StylePreset, compose_material,
    material_customization, resolve_brand_preset, resolve_style,
};

/// Owns the editor state and keeps the derived material in sync with it.
///
/// Every successful mutation bumps `revision`, which consumers use to
/// notice that something changed since the last frame.
#[derive(Debug, Clone)]
pub struct EditorStore {
    state: EditorState,
    material: ResolvedMaterial,
    revision: u64,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// Create a store holding the default state
    pub fn new() -> Self {
        let state = EditorState::default();
        let material = compose_material(&state);
        Self {
            state,
            material,
            revision: 0,
        }
    }

    /// Create a store from an existing state, rejecting out-of-range values
    pub fn with_state(state: EditorState) -> Result<Self, StateError> {
        state.validate()?;
        let material = compose_material(&state);
        Ok(Self {
            state,
            material,
            revision: 0,
        })
    }

    /// Borrow the current state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> EditorState {
        self.state.clone()
    }

    /// Material derived from the current state
    pub fn material(&self) -> &ResolvedMaterial {
        &self.material
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether roughness/metalness still match the selected style
    pub fn material_customization(&self) -> MaterialCustomization {
        material_customization(&self.state)
    }

    /// Shallow-merge `patch` into the state.
    ///
    /// The merged result is validated as a whole; on error nothing changes.
    pub fn update(&mut self, patch: EditorPatch) -> Result<(), StateError> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut candidate = self.state.clone();
        patch.apply_to(&mut candidate);
        if let Err(e) = candidate.validate() {
            tracing::warn!("Rejected editor update {:?}: {}", patch.touched_fields(), e);
            return Err(e);
        }

        tracing::debug!("Editor update {:?}", patch.touched_fields());
        let recompute_material = patch.touches_material();
        self.commit(candidate, recompute_material);
        Ok(())
    }

    /// Zero the three rotation fields, leaving everything else untouched
    pub fn reset_transform(&mut self) {
        let mut candidate = self.state.clone();
        candidate.rotation_x = 0.0;
        candidate.rotation_y = 0.0;
        candidate.rotation_z = 0.0;
        self.commit(candidate, false);
    }

    /// Merge the patch of a brand preset over the current state
    pub fn apply_brand_preset(&mut self, preset: BrandPreset) {
        let mut candidate = self.state.clone();
        resolve_brand_preset(preset).apply_to(&mut candidate);
        debug_assert!(candidate.validate().is_ok(), "preset {:?} is out of range", preset);

        tracing::info!("Applied brand preset {}", preset.name());
        self.commit(candidate, true);
    }

    /// Switch style and take its roughness/metalness as the new starting point
    pub fn select_style(&mut self, style: StylePreset) {
        let config = resolve_style(style);
        let mut candidate = self.state.clone();
        candidate.style = style;
        candidate.roughness = config.roughness;
        candidate.metalness = config.metalness;
        self.commit(candidate, true);
    }

    /// Restore every field to its default
    pub fn reset_all(&mut self) {
        self.commit(EditorState::default(), true);
    }

    fn commit(&mut self, state: EditorState, recompute_material: bool) {
        if state == self.state {
            return;
        }
        self.state = state;
        if recompute_material {
            self.material = compose_material(&self.state);
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{BackgroundMode, MaterialPreset};
    use proptest::prelude::*;

    #[test]
    fn test_update_merges_fields() {
        let mut store = EditorStore::new();
        store
            .update(EditorPatch {
                roughness: Some(0.7),
                ..Default::default()
            })
            .unwrap();
        store
            .update(EditorPatch {
                background_mode: Some(BackgroundMode::Studio),
                ..Default::default()
            })
            .unwrap();

        let expected = EditorState {
            roughness: 0.7,
            background_mode: BackgroundMode::Studio,
            ..Default::default()
        };
        assert_eq!(store.state(), &expected);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_rejected_update_leaves_state_untouched() {
        let mut store = EditorStore::new();
        let result = store.update(EditorPatch {
            roughness: Some(0.4),
            metalness: Some(2.0),
            ..Default::default()
        });

        assert!(matches!(
            result,
            Err(StateError::OutOfRange {
                field: "metalness",
                ..
            })
        ));
        assert_eq!(store.state(), &EditorState::default());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_update_recomputes_material() {
        let mut store = EditorStore::new();
        store
            .update(EditorPatch {
                material_preset: Some(MaterialPreset::Marble),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.material().base_color.to_hex_string(), "#f5f5dc");
    }

    #[test]
    fn test_reset_transform_only_touches_rotation() {
        let mut store = EditorStore::new();
        store
            .update(EditorPatch {
                rotation_x: Some(30.0),
                rotation_y: Some(-45.0),
                rotation_z: Some(90.0),
                light_intensity: Some(2.5),
                style: Some(StylePreset::Glass),
                ..Default::default()
            })
            .unwrap();

        store.reset_transform();
        let once = store.snapshot();
        store.reset_transform();

        assert_eq!(store.state(), &once);
        assert_eq!((once.rotation_x, once.rotation_y, once.rotation_z), (0.0, 0.0, 0.0));
        assert_eq!(once.light_intensity, 2.5);
        assert_eq!(once.style, StylePreset::Glass);
    }

    #[test]
    fn test_gaming_preset_then_reset_transform() {
        let mut store = EditorStore::new();
        store
            .update(EditorPatch {
                rotation_y: Some(120.0),
                ..Default::default()
            })
            .unwrap();

        store.apply_brand_preset(BrandPreset::Gaming);
        let state = store.state();
        assert_eq!(state.style, StylePreset::Neon);
        assert!(state.particles_enabled);
        assert_eq!(state.background_mode, BackgroundMode::DarkStage);
        assert_eq!(state.bloom_intensity, 1.0);

        store.reset_transform();
        let state = store.state();
        assert_eq!(state.rotation_y, 0.0);
        assert_eq!(state.style, StylePreset::Neon);
        assert_eq!(state.material_preset, MaterialPreset::CarbonFiber);
        assert_eq!(state.roughness, 0.5);
        assert_eq!(state.metalness, 0.6);
    }

    #[test]
    fn test_manual_edit_overrides_preset_until_next_preset() {
        let mut store = EditorStore::new();
        store.apply_brand_preset(BrandPreset::Luxury);
        store
            .update(EditorPatch {
                roughness: Some(0.9),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.state().roughness, 0.9);

        store.apply_brand_preset(BrandPreset::Luxury);
        assert_eq!(store.state().roughness, 0.2);
    }

    #[test]
    fn test_select_style_seeds_surface_values() {
        let mut store = EditorStore::new();
        store.select_style(StylePreset::Chrome);
        assert_eq!(store.state().roughness, 0.1);
        assert_eq!(store.state().metalness, 1.0);
        assert_eq!(store.material_customization(), MaterialCustomization::Preset);

        store
            .update(EditorPatch {
                roughness: Some(0.6),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.material_customization(), MaterialCustomization::Customized);
    }

    #[test]
    fn test_with_state_rejects_invalid() {
        let state = EditorState {
            animation_speed: 0.0,
            ..Default::default()
        };
        assert!(EditorStore::with_state(state).is_err());
    }

    fn unit() -> impl Strategy<Value = f32> {
        0.0f32..=1.0
    }

    fn arb_patch() -> impl Strategy<Value = EditorPatch> {
        (
            proptest::option::of(unit()),
            proptest::option::of(unit()),
            proptest::option::of(-180.0f32..=180.0),
            proptest::option::of(0.0f32..=3.0),
            proptest::option::of(any::<bool>()),
            proptest::option::of(proptest::sample::select(StylePreset::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(BackgroundMode::ALL.to_vec())),
            proptest::option::of("[A-Za-z]{0,20}"),
        )
            .prop_map(
                |(roughness, metalness, rotation_y, light_intensity, bloom, style, bg, name)| {
                    EditorPatch {
                        roughness,
                        metalness,
                        rotation_y,
                        light_intensity,
                        bloom_enabled: bloom,
                        style,
                        background_mode: bg,
                        brand_name: name,
                        ..Default::default()
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn prop_update_is_shallow_merge(first in arb_patch(), second in arb_patch()) {
            let mut store = EditorStore::new();
            store.update(first.clone()).unwrap();
            store.update(second.clone()).unwrap();

            let mut expected = EditorState::default();
            first.apply_to(&mut expected);
            second.apply_to(&mut expected);
            prop_assert_eq!(store.state(), &expected);

            // Fields neither patch names keep their defaults
            let defaults = EditorState::default();
            prop_assert_eq!(store.state().extrusion_depth, defaults.extrusion_depth);
            prop_assert_eq!(store.state().material_preset, defaults.material_preset);
        }

        #[test]
        fn prop_brand_presets_keep_state_valid(
            start in arb_patch(),
            preset in proptest::sample::select(BrandPreset::ALL.to_vec()),
        ) {
            let mut store = EditorStore::new();
            store.update(start).unwrap();
            store.apply_brand_preset(preset);
            prop_assert!(store.state().validate().is_ok());
        }
    }
}
