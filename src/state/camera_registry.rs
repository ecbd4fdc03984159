// ============================================================================
// CAMERA REGISTRY - Cámaras enumeradas + selección actual
// ============================================================================
// Se llena una vez por ciclo de render (no se refresca solo): para detectar
// hardware nuevo hay que hacer clear() + render()
// ============================================================================

use crate::models::CameraDescriptor;

#[derive(Debug, Clone, Default)]
pub struct CameraRegistry {
    cameras: Vec<CameraDescriptor>,
    // Siempre es un índice válido de `cameras` cuando es Some
    selected: Option<usize>,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reemplazar la lista enumerada y seleccionar la última cámara.
    /// Devuelve la cámara seleccionada (None si la lista está vacía)
    pub fn replace(&mut self, cameras: Vec<CameraDescriptor>) -> Option<&CameraDescriptor> {
        self.selected = cameras.len().checked_sub(1);
        self.cameras = cameras;
        self.selected()
    }

    pub fn selected(&self) -> Option<&CameraDescriptor> {
        self.selected.and_then(|index| self.cameras.get(index))
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected().map(|camera| camera.id.clone())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Avanzar la selección cíclicamente: (index + 1) mod count
    pub fn advance(&mut self) -> Option<&CameraDescriptor> {
        let index = self.selected?;
        self.selected = Some((index + 1) % self.cameras.len());
        self.selected()
    }

    /// Solo tiene sentido cambiar de cámara con más de una
    pub fn can_switch(&self) -> bool {
        self.cameras.len() > 1
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.cameras.iter().map(|camera| camera.id.clone()).collect()
    }

    pub fn reset(&mut self) {
        self.cameras.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cameras(ids: &[&str]) -> Vec<CameraDescriptor> {
        ids.iter().map(|id| CameraDescriptor::new(*id, format!("Camera {}", id))).collect()
    }

    #[test]
    fn test_replace_selects_last() {
        let mut registry = CameraRegistry::new();
        let selected = registry.replace(cameras(&["camA", "camB"])).map(|c| c.id.clone());
        assert_eq!(selected.as_deref(), Some("camB"));
        assert_eq!(registry.selected_index(), Some(1));
    }

    #[test]
    fn test_replace_with_empty_clears_selection() {
        let mut registry = CameraRegistry::new();
        registry.replace(cameras(&["camA"]));
        assert!(registry.replace(Vec::new()).is_none());
        assert_eq!(registry.selected_index(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_advance_cycles_through_all_ids() {
        let mut registry = CameraRegistry::new();
        registry.replace(cameras(&["a", "b", "c"]));
        let seen: Vec<String> = (0..6)
            .filter_map(|_| registry.advance().map(|c| c.id.clone()))
            .collect();
        assert_eq!(seen, vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_advance_without_selection() {
        let mut registry = CameraRegistry::new();
        assert!(registry.advance().is_none());
        assert!(!registry.can_switch());
    }

    #[test]
    fn test_single_camera_stays_selected() {
        let mut registry = CameraRegistry::new();
        registry.replace(cameras(&["only"]));
        assert!(!registry.can_switch());
        assert_eq!(registry.advance().map(|c| c.id.as_str()), Some("only"));
    }
}
