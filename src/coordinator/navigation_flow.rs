use super::Coordinator;

use crate::{error::Error, navigation::NavigationOptions};

impl Coordinator {
    #[tracing::instrument(skip(self))]
    pub(super) fn on_start_clicked(&mut self) -> Result<(), Error> {
        let options =
            NavigationOptions::build(self.state.current_route(), self.config.simulate_route)
                .map_err(|err| {
                    tracing::error!(phase = ?self.state.phase(), "start rejected: {}", err);
                    err
                })?;

        tracing::info!(
            route = %options.route.token,
            simulate = options.simulate_route,
            "starting navigation"
        );

        self.launcher.start_navigation(options);

        Ok(())
    }
}
