//! Attach/update lifecycle for permission-bound elements.

use super::{Presentation, UiElement};
use gatekeep_auth::{PermissionQuery, RequiredPermission};
use serde::{Deserialize, Serialize};

/// What to do with an element whose permission check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMode {
    /// Hide and mark; restored when the check passes again.
    #[default]
    Hide,
    /// Detach permanently. A later grant does not bring the element back.
    Remove,
}

/// Association between one element and its requirement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementBinding {
    pub required: RequiredPermission,
    pub mode: RemovalMode,
}

impl ElementBinding {
    /// Hides the element when `required` is not met.
    #[must_use]
    pub fn hide(required: impl Into<RequiredPermission>) -> Self {
        Self {
            required: required.into(),
            mode: RemovalMode::Hide,
        }
    }

    /// Removes the element when `required` is not met.
    #[must_use]
    pub fn remove(required: impl Into<RequiredPermission>) -> Self {
        Self {
            required: required.into(),
            mode: RemovalMode::Remove,
        }
    }
}

/// Applies permission decisions to element presentation.
///
/// Call [`on_attach`](Self::on_attach) when the element is mounted and
/// [`on_update`](Self::on_update) on every re-render. Both recompute the
/// decision from the current session.
///
/// Hide and remove are not symmetric. A hidden element stays attached and
/// is restored by the next update after the principal gains the
/// permission. A removed element is detached and stays detached; only its
/// owner can attach a new one.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{PermissionQuery, SessionCell, SessionToken};
/// use gatekeep_runtime::visibility::{ElementBinding, ElementState, Presentation, VisibilityController};
/// use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
/// use std::sync::Arc;
///
/// let cell = Arc::new(SessionCell::new());
/// let controller = VisibilityController::new(PermissionQuery::with_default_policy(cell.clone()));
/// cell.sign_in(
///     SessionToken::generate(),
///     Principal::new(PrincipalId::named("olga"), "olga", Role::User),
/// );
///
/// let binding = ElementBinding::hide(PermissionCode::PRODUCT_EDIT);
/// let mut edit_button = ElementState::new();
/// assert_eq!(controller.on_attach(&mut edit_button, &binding), Presentation::Hidden);
///
/// cell.update_principal(|p| p.with_permission(PermissionCode::PRODUCT_EDIT));
/// assert_eq!(controller.on_update(&mut edit_button, &binding), Presentation::Visible);
/// ```
#[derive(Debug, Clone)]
pub struct VisibilityController {
    query: PermissionQuery,
}

impl VisibilityController {
    /// Creates a controller reading from `query`'s session.
    #[must_use]
    pub fn new(query: PermissionQuery) -> Self {
        Self { query }
    }

    /// Computes the presentation `binding` calls for, without touching an element.
    #[must_use]
    pub fn intent(&self, binding: &ElementBinding) -> Presentation {
        if self.query.check(&binding.required) {
            Presentation::Visible
        } else {
            match binding.mode {
                RemovalMode::Hide => Presentation::Hidden,
                RemovalMode::Remove => Presentation::Removed,
            }
        }
    }

    /// Applies the binding when the element is first attached.
    pub fn on_attach<E: UiElement + ?Sized>(
        &self,
        element: &mut E,
        binding: &ElementBinding,
    ) -> Presentation {
        self.apply(element, binding)
    }

    /// Re-applies the binding on an update cycle.
    ///
    /// A detached element is left alone and reported as removed.
    pub fn on_update<E: UiElement + ?Sized>(
        &self,
        element: &mut E,
        binding: &ElementBinding,
    ) -> Presentation {
        self.apply(element, binding)
    }

    fn apply<E: UiElement + ?Sized>(&self, element: &mut E, binding: &ElementBinding) -> Presentation {
        if !element.is_attached() {
            return Presentation::Removed;
        }

        let presentation = self.intent(binding);
        match presentation {
            Presentation::Visible => element.show(),
            Presentation::Hidden => element.hide(),
            Presentation::Removed => element.detach(),
        }
        tracing::trace!(
            required = %binding.required,
            presentation = %presentation,
            "element visibility applied"
        );
        presentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::{ElementState, HIDDEN_ATTRIBUTE, HIDDEN_CLASS};
    use gatekeep_auth::{SessionCell, SessionToken};
    use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
    use std::sync::Arc;

    fn setup() -> (Arc<SessionCell>, VisibilityController) {
        let cell = Arc::new(SessionCell::new());
        let controller =
            VisibilityController::new(PermissionQuery::with_default_policy(cell.clone()));
        (cell, controller)
    }

    fn sign_in(cell: &SessionCell, role: Role, codes: &[PermissionCode]) {
        let p = Principal::new(PrincipalId::named("paul"), "paul", role)
            .with_permissions(codes.iter().cloned());
        cell.sign_in(SessionToken::generate(), p);
    }

    fn grant(cell: &SessionCell, code: PermissionCode) {
        assert!(cell.update_principal(|p| p.with_permission(code)));
    }

    #[test]
    fn hide_then_grant_restores() {
        let (cell, controller) = setup();
        sign_in(&cell, Role::User, &[PermissionCode::PRODUCT_VIEW]);
        let binding = ElementBinding::hide(RequiredPermission::all([PermissionCode::PRODUCT_EDIT]));
        let mut el = ElementState::new().with_class("btn");

        assert_eq!(controller.on_attach(&mut el, &binding), Presentation::Hidden);
        assert_eq!(el.display(), Some("none"));
        assert_eq!(el.visibility(), Some("hidden"));
        assert!(el.has_class(HIDDEN_CLASS));
        assert_eq!(el.attribute(HIDDEN_ATTRIBUTE), Some("true"));
        assert!(el.is_attached());

        grant(&cell, PermissionCode::PRODUCT_EDIT);
        assert_eq!(controller.on_update(&mut el, &binding), Presentation::Visible);
        assert_eq!(el.display(), None);
        assert_eq!(el.visibility(), None);
        assert!(!el.has_class(HIDDEN_CLASS));
        assert_eq!(el.attribute(HIDDEN_ATTRIBUTE), None);
        assert!(el.has_class("btn"));
    }

    #[test]
    fn remove_is_not_resurrected() {
        let (cell, controller) = setup();
        sign_in(&cell, Role::User, &[]);
        let binding = ElementBinding::remove(RequiredPermission::all([PermissionCode::PRODUCT_EDIT]));
        let mut el = ElementState::new();

        assert_eq!(controller.on_attach(&mut el, &binding), Presentation::Removed);
        assert!(!el.is_attached());

        grant(&cell, PermissionCode::PRODUCT_EDIT);
        assert_eq!(controller.on_update(&mut el, &binding), Presentation::Removed);
        assert!(!el.is_attached());
        // The decision itself now passes; only the element is gone.
        assert_eq!(controller.intent(&binding), Presentation::Visible);
    }

    #[test]
    fn revoke_hides_again() {
        let (cell, controller) = setup();
        sign_in(&cell, Role::User, &[PermissionCode::ORDER_EDIT]);
        let binding = ElementBinding::hide(PermissionCode::ORDER_EDIT);
        let mut el = ElementState::new();

        assert_eq!(controller.on_attach(&mut el, &binding), Presentation::Visible);
        cell.update_principal(|p| p.without_permission(&PermissionCode::ORDER_EDIT));
        assert_eq!(controller.on_update(&mut el, &binding), Presentation::Hidden);
    }

    #[test]
    fn admin_sees_everything() {
        let (cell, controller) = setup();
        sign_in(&cell, Role::Admin, &[]);
        let binding = ElementBinding::remove(RequiredPermission::all([
            PermissionCode::SYSTEM_EDIT,
            PermissionCode::from("not_a_code"),
        ]));
        let mut el = ElementState::new();
        assert_eq!(controller.on_attach(&mut el, &binding), Presentation::Visible);
        assert!(el.is_attached());
    }

    #[test]
    fn signed_out_hides_even_unrestricted_binding() {
        let (_cell, controller) = setup();
        let mut el = ElementState::new();
        assert_eq!(
            controller.on_attach(&mut el, &ElementBinding::default()),
            Presentation::Hidden
        );
    }

    #[test]
    fn update_is_idempotent() {
        let (cell, controller) = setup();
        sign_in(&cell, Role::User, &[]);
        let binding = ElementBinding::hide(PermissionCode::USER_DELETE);
        let mut el = ElementState::new();

        controller.on_attach(&mut el, &binding);
        let once = el.clone();
        controller.on_update(&mut el, &binding);
        controller.on_update(&mut el, &binding);
        assert_eq!(el, once);
    }

    #[test]
    fn works_through_trait_object() {
        let (cell, controller) = setup();
        sign_in(&cell, Role::User, &[]);
        let mut boxed: Box<dyn UiElement> = Box::new(ElementState::new());
        let binding = ElementBinding::remove(PermissionCode::USER_DELETE);
        assert_eq!(controller.on_attach(boxed.as_mut(), &binding), Presentation::Removed);
        assert!(!boxed.is_attached());
    }

    #[test]
    fn removal_mode_serde() {
        #[derive(Deserialize)]
        struct Holder {
            mode: RemovalMode,
        }
        let parsed: Holder = toml::from_str(r#"mode = "remove""#).expect("parse");
        assert_eq!(parsed.mode, RemovalMode::Remove);
    }
}
