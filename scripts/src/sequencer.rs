//! Ordering and execution of the deploy steps
//!
//! Steps are ordered by their declared dependencies and then run strictly one
//! after another. There is no rollback: a failed deployment leaves the earlier
//! records in place, and re-running resumes from the failed step.

use std::collections::{BTreeSet, HashMap};

use alloy::primitives::Address;
use itertools::Itertools;
use tracing::{error, info, warn};

use crate::{
    calls::PendingCall,
    chain::ChainBackend,
    config::DeployConfig,
    configurator::{configure_game_logic, plan_configuration, ConfigurationOutcome},
    errors::ScriptError,
    ownership::{transfer_ownership_step, OwnershipOutcome},
    registry::{ArtifactSource, DeployOptions, DeploymentRecord, Registry},
    types::GameContract,
};

/// A named deploy step that may depend on other steps by name
pub trait DeployStep: Copy {
    /// The step's name, also its tag
    fn name(&self) -> &str;
    /// The names of the steps that must run first
    fn dependencies(&self) -> &[&str];
}

impl DeployStep for GameContract {
    fn name(&self) -> &str {
        GameContract::name(self)
    }

    fn dependencies(&self) -> &[&str] {
        GameContract::dependencies(self)
    }
}

/// Order `steps` so that every step runs after its dependencies
///
/// When `selected` is empty every step runs; otherwise only the selected
/// steps and their transitive dependencies do. Ties are broken by
/// declaration order, so the result is deterministic.
pub fn order_steps<S: DeployStep>(steps: &[S], selected: &[S]) -> Result<Vec<S>, ScriptError> {
    let index: HashMap<&str, usize> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| (step.name(), i))
        .collect();

    // Resolve the dependency edges up front so unknown names fail early
    let mut deps: Vec<Vec<usize>> = Vec::with_capacity(steps.len());
    for step in steps {
        let resolved = step
            .dependencies()
            .iter()
            .map(|dep| {
                index
                    .get(dep)
                    .copied()
                    .ok_or_else(|| ScriptError::UnknownStep(dep.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        deps.push(resolved);
    }

    let included = if selected.is_empty() {
        (0..steps.len()).collect::<BTreeSet<_>>()
    } else {
        let mut included = BTreeSet::new();
        let mut stack = selected
            .iter()
            .map(|step| {
                index
                    .get(step.name())
                    .copied()
                    .ok_or_else(|| ScriptError::UnknownStep(step.name().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        while let Some(i) = stack.pop() {
            if included.insert(i) {
                stack.extend(deps[i].iter().copied());
            }
        }
        included
    };

    // Kahn's algorithm, always taking the earliest-declared ready step
    let mut remaining: HashMap<usize, usize> =
        included.iter().map(|&i| (i, deps[i].len())).collect();
    let mut ready: BTreeSet<usize> = remaining
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(&i, _)| i)
        .collect();

    let mut order = Vec::with_capacity(included.len());
    while let Some(i) = ready.pop_first() {
        remaining.remove(&i);
        order.push(steps[i]);

        for (&j, count) in remaining.iter_mut() {
            let edges = deps[j].iter().filter(|&&d| d == i).count();
            if edges > 0 {
                *count -= edges;
                if *count == 0 {
                    ready.insert(j);
                }
            }
        }
    }

    if !remaining.is_empty() {
        let mut stuck: Vec<usize> = remaining.into_keys().collect();
        stuck.sort_unstable();
        return Err(ScriptError::DependencyCycle(
            stuck.into_iter().map(|i| steps[i].name().to_string()).collect(),
        ));
    }

    Ok(order)
}

// ------------------
// | Deployment Run |
// ------------------

/// The outcome of a single deploy step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The contract deployed by the step
    pub contract: GameContract,
    /// The deployment record, new or reused
    pub record: DeploymentRecord,
    /// Whether the contract was deployed in this run
    pub newly_deployed: bool,
    /// The ownership transfer, for contracts deployed with the deployer as owner
    pub ownership: Option<OwnershipOutcome>,
    /// The post-deployment configuration, for the game logic step
    pub configuration: Option<ConfigurationOutcome>,
}

/// The outcome of a deployment run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentReport {
    /// The steps that ran, in execution order
    pub steps: Vec<StepReport>,
}

impl DeploymentReport {
    /// The address deployed by `contract` in this run, if its step ran
    pub fn address_of(&self, contract: GameContract) -> Option<Address> {
        self.steps
            .iter()
            .find(|step| step.contract == contract)
            .map(|step| step.record.address)
    }

    /// The calls the administrator still has to make
    pub fn pending_calls(&self) -> Vec<PendingCall> {
        self.steps
            .iter()
            .filter_map(|step| match &step.configuration {
                Some(ConfigurationOutcome::ManualActionRequired(calls)) => Some(calls.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// The contracts whose ownership transfer failed
    pub fn failed_transfers(&self) -> Vec<GameContract> {
        self.steps
            .iter()
            .filter(|step| step.ownership.as_ref().is_some_and(|o| !o.admin_owns()))
            .map(|step| step.contract)
            .collect()
    }
}

/// Deploy the `selected` game contracts (all of them if empty) and their dependencies
///
/// A deployment error aborts the run. Ownership transfer failures are
/// reported, not raised. Configuration call failures are raised.
pub async fn run_deployment<B: ChainBackend, A: ArtifactSource>(
    registry: &mut Registry<'_, B, A>,
    config: &DeployConfig,
    selected: &[GameContract],
) -> Result<DeploymentReport, ScriptError> {
    let backend = registry.backend();
    let deployer = backend.signer_address();
    let order = order_steps(&GameContract::ALL, selected)?;
    info!(
        "deploying [{}] to {} from {}",
        order.iter().map(GameContract::name).join(", "),
        config.network,
        deployer
    );

    let mut report = DeploymentReport::default();
    for contract in order {
        let options = DeployOptions {
            from: deployer,
            args: config.constructor_args(contract),
        };
        let deployed = registry.deploy(contract, options).await?;
        let address = deployed.record.address;

        let (ownership, configuration) = match contract {
            // Constructed with the administrator as owner, nothing to transfer
            GameContract::Logic => {
                info!("{contract} deployed to: {address} with owner: {}", config.admin);
                let character = registry.get(GameContract::Character)?.address;
                let item = registry.get(GameContract::Item)?.address;
                let plan = plan_configuration(character, item, address);
                let outcome = configure_game_logic(backend, config.admin, plan).await?;
                (None, Some(outcome))
            }
            _ => {
                info!("{contract} deployed to: {address}");
                let outcome = transfer_ownership_step(
                    backend,
                    contract,
                    address,
                    config.admin,
                    &config.network,
                    !deployed.newly_deployed,
                )
                .await;
                (Some(outcome), None)
            }
        };

        report.steps.push(StepReport {
            contract,
            record: deployed.record,
            newly_deployed: deployed.newly_deployed,
            ownership,
            configuration,
        });
    }

    for contract in report.failed_transfers() {
        error!("{contract} is still owned by the deployer {deployer}, not {}", config.admin);
    }
    let pending = report.pending_calls();
    if !pending.is_empty() {
        warn!("{} call(s) must still be made by {}", pending.len(), config.admin);
    }

    Ok(report)
}
