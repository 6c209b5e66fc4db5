use crate::entities::Route;
use crate::error::{precondition_error, Error};

/// Everything the external navigation engine needs for a one-shot launch.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationOptions {
    pub route: Route,
    pub simulate_route: bool,
}

impl NavigationOptions {
    /// Fails when there is no current route to hand off.
    pub fn build(route: Option<&Route>, simulate_route: bool) -> Result<Self, Error> {
        let route = route.ok_or_else(|| precondition_error("no current route to navigate"))?;

        Ok(Self {
            route: route.clone(),
            simulate_route,
        })
    }
}
