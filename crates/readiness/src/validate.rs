//! Existence checks for the entities an analysis request refers to.

use kitready_core::{BomId, DomainError, DomainResult, MachineId, ProjectId};

use crate::bom::{Bom, Machine, Project};

/// Read access to projects, BOMs and machines.
pub trait ProjectDirectory {
    fn project(&self, id: ProjectId) -> Option<Project>;
    fn bom(&self, id: BomId) -> Option<Bom>;
    fn machine(&self, id: MachineId) -> Option<Machine>;
}

impl<D> ProjectDirectory for &D
where
    D: ProjectDirectory + ?Sized,
{
    fn project(&self, id: ProjectId) -> Option<Project> {
        (**self).project(id)
    }

    fn bom(&self, id: BomId) -> Option<Bom> {
        (**self).bom(id)
    }

    fn machine(&self, id: MachineId) -> Option<Machine> {
        (**self).machine(id)
    }
}

/// Entities resolved by [`validate_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub project: Project,
    pub bom: Bom,
    pub machine: Option<Machine>,
}

/// Resolve project, BOM and (when given) machine, failing on the first miss.
pub fn validate_input(
    directory: &dyn ProjectDirectory,
    project_id: ProjectId,
    bom_id: BomId,
    machine_id: Option<MachineId>,
) -> DomainResult<ValidatedInput> {
    let project = directory
        .project(project_id)
        .ok_or_else(|| DomainError::not_found("project"))?;
    let bom = directory
        .bom(bom_id)
        .ok_or_else(|| DomainError::not_found("BOM"))?;
    let machine = match machine_id {
        Some(id) => Some(
            directory
                .machine(id)
                .ok_or_else(|| DomainError::not_found("machine"))?,
        ),
        None => None,
    };

    Ok(ValidatedInput {
        project,
        bom,
        machine,
    })
}
