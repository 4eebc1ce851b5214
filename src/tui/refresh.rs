// One dashboard refresh cycle.
//
// "Not configured" conditions are outcomes, not errors: the dashboard
// renders a prompt and the app keeps running. Hard failures (config
// format, remote service) land in Failed with their diagnostic text.

use crate::zerotier::{ApiError, Member, Network, ZeroTier};

#[derive(Debug)]
pub enum RefreshOutcome {
    /// No token in the config; nothing was fetched.
    NotConfigured,
    /// Token works but the account has no networks yet.
    NoNetworks,
    /// The preferred network id is not in the fetched list.
    PreferredMissing { id: String },
    /// The preferred network and its members.
    Ready {
        network: Network,
        members: Vec<Member>,
    },
    Failed(String),
}

pub async fn run_refresh(zt: &ZeroTier) -> RefreshOutcome {
    match refresh_inner(zt).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "refresh failed");
            RefreshOutcome::Failed(e.to_string())
        }
    }
}

async fn refresh_inner(zt: &ZeroTier) -> Result<RefreshOutcome, ApiError> {
    let mut config = zt.load_config()?;
    if config.token().is_none() {
        tracing::info!("no ZeroTier token configured");
        return Ok(RefreshOutcome::NotConfigured);
    }

    let networks = zt.list_networks().await?;

    // No preference yet: adopt the first network the service returned and
    // persist it, exactly once.
    let preferred_id = match config.preferred_network_id.clone() {
        Some(id) => id,
        None => {
            tracing::info!("no preferred network configured");
            let Some(first) = networks.first() else {
                return Ok(RefreshOutcome::NoNetworks);
            };
            let id = first.id.clone();
            config.preferred_network_id = Some(id.clone());
            zt.save_config(&config)?;
            id
        }
    };

    let Some(network) = networks.into_iter().find(|n| n.id == preferred_id) else {
        tracing::error!(preferred = %preferred_id, "preferred network not found");
        return Ok(RefreshOutcome::PreferredMissing { id: preferred_id });
    };

    let members = zt.list_members(&network.id).await?;
    Ok(RefreshOutcome::Ready { network, members })
}
