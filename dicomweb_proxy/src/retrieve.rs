//! C-MOVE to WADO-RS, one instance at a time.

use crate::api::{DicomWebClient, ModalitiesClient, ToolsClient};
use crate::config::ProxyConfig;
use crate::error::{ProxyError, SequencingError, TransportError};
use crate::models::{MoveOriginator, MoveRequest, RemoteInstance, RetrieveScope};
use crate::resolve::resolve_alias_for_aet;
use crate::rest::RestApi;
use orthanc_api::{
    DicomWebGetRequest, DicomWebRetrieveRequest, DicomWebServerAlias, InstanceId, ModalityAlias,
    StoreRequest,
};
use std::collections::HashSet;

/// Lifecycle of a [RetrieveSession].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionState {
    Created,
    Listed,
    Transferring,
    Released,
}

/// The work of a C-MOVE: instances are listed using WADO-RS metadata, then each
/// instance is retrieved into Orthanc and sent to the destination modality.
///
/// Retrieved instances are kept in Orthanc until [RetrieveSession::release]
/// is called. Dropping a session does not delete them.
pub struct RetrieveSession<A> {
    dicomweb: DicomWebClient<A>,
    tools: ToolsClient<A>,
    modalities: ModalitiesClient<A>,
    server: DicomWebServerAlias,
    scope: RetrieveScope,
    destination: ModalityAlias,
    local_aet: Option<String>,
    timeout: Option<u32>,
    originator: Option<MoveOriginator>,
    instances: Vec<RemoteInstance>,
    cursor: usize,
    staged: Vec<InstanceId>,
    state: SessionState,
}

impl<A: RestApi + Clone> RetrieveSession<A> {
    /// Validate a C-MOVE request and resolve its destination modality.
    ///
    /// Nothing is requested from the DICOMweb server.
    pub fn open(api: A, request: &MoveRequest, config: &ProxyConfig) -> Result<Self, ProxyError> {
        let request = request.validate()?;
        let modalities = ModalitiesClient::new(api.clone());
        let listing = modalities.list_modalities()?;
        let destination = resolve_alias_for_aet(&listing, &request.destination)?;
        tracing::info!(
            server = %request.server,
            level = request.scope.level().as_str(),
            StudyInstanceUID = request.scope.study_instance_uid(),
            destination = %destination,
            "Opened C-MOVE"
        );
        let originator = request.originator.filter(|_| config.forward_move_originator);
        Ok(Self {
            dicomweb: DicomWebClient::new(api.clone()),
            tools: ToolsClient::new(api),
            modalities,
            server: request.server,
            scope: request.scope,
            destination,
            local_aet: config.local_aet.clone(),
            timeout: config.store_timeout,
            originator,
            instances: Vec::new(),
            cursor: 0,
            staged: Vec::new(),
            state: SessionState::Created,
        })
    }

    /// Find the instances to retrieve using WADO-RS metadata. Returns the number of instances.
    pub fn list(&mut self) -> Result<usize, ProxyError> {
        match self.state {
            SessionState::Created => (),
            SessionState::Released => return Err(SequencingError::Released.into()),
            SessionState::Listed | SessionState::Transferring => {
                return Err(SequencingError::AlreadyListed.into());
            }
        }
        let request = DicomWebGetRequest {
            uri: self.scope.metadata_uri(),
            http_headers: [("Accept".to_string(), "application/json".to_string())].into(),
            arguments: Default::default(),
        };
        let records = self.dicomweb.get(&self.server, &request)?;
        let total = records.len();
        let mut seen = HashSet::new();
        self.instances = records
            .iter()
            .filter_map(RemoteInstance::from_metadata)
            .filter(|instance| self.scope.accepts(instance))
            .filter(|instance| seen.insert(instance.sop_instance_uid.clone()))
            .collect();
        if self.instances.len() < total {
            tracing::debug!(
                server = %self.server,
                skipped = total - self.instances.len(),
                "Skipped metadata records"
            );
        }
        tracing::info!(
            server = %self.server,
            uri = request.uri.as_str(),
            count = self.instances.len(),
            "Listed instances"
        );
        self.state = SessionState::Listed;
        Ok(self.instances.len())
    }

    /// Retrieve the next instance into Orthanc, then send it to the destination.
    /// Returns the Orthanc ID of the instance.
    pub fn advance(&mut self) -> Result<InstanceId, ProxyError> {
        match self.state {
            SessionState::Listed | SessionState::Transferring => (),
            SessionState::Created => return Err(SequencingError::NotListed.into()),
            SessionState::Released => return Err(SequencingError::Released.into()),
        }
        let instance = match self.instances.get(self.cursor) {
            Some(instance) => instance.clone(),
            None => {
                let count = self.instances.len();
                return Err(SequencingError::Exhausted { count }.into());
            }
        };
        self.state = SessionState::Transferring;
        self.retrieve(&instance)?;
        let id = self
            .tools
            .lookup_instance(&instance.sop_instance_uid)?
            .ok_or_else(|| TransportError::NotFoundLocally(instance.sop_instance_uid.clone()))?
            .id;
        self.staged.push(id.clone());
        self.cursor += 1;
        self.store(&id)?;
        tracing::info!(
            SOPInstanceUID = instance.sop_instance_uid.as_str(),
            destination = %self.destination,
            index = self.cursor,
            count = self.instances.len(),
            "Forwarded instance"
        );
        Ok(id)
    }

    fn retrieve(&self, instance: &RemoteInstance) -> Result<(), ProxyError> {
        let request = DicomWebRetrieveRequest {
            resources: vec![instance.into()],
        };
        let answer = self.dicomweb.retrieve(&self.server, &request)?;
        if answer.as_object().is_some_and(|o| !o.is_empty()) {
            Ok(())
        } else {
            let e = TransportError::RetrieveRejected {
                server: self.server.to_string(),
                sop_instance_uid: instance.sop_instance_uid.clone(),
                answer,
            };
            Err(e.into())
        }
    }

    fn store(&self, id: &InstanceId) -> Result<(), ProxyError> {
        let request = StoreRequest {
            resources: vec![id.clone()],
            synchronous: Some(true),
            local_aet: self.local_aet.clone(),
            timeout: self.timeout,
            move_originator_aet: self.originator.as_ref().map(|o| o.aet.to_string()),
            move_originator_id: self.originator.as_ref().map(|o| o.id),
        };
        self.modalities.store(&self.destination, &request)?;
        Ok(())
    }

    /// Delete all the instances which were retrieved into Orthanc.
    ///
    /// If deleting fails, the instances are kept track of and the next call
    /// to this method tries again.
    pub fn release(&mut self) -> Result<(), ProxyError> {
        self.state = SessionState::Released;
        if self.staged.is_empty() {
            return Ok(());
        }
        self.tools.bulk_delete(self.staged.clone())?;
        tracing::info!(
            server = %self.server,
            count = self.staged.len(),
            "Deleted retrieved instances"
        );
        self.staged.clear();
        Ok(())
    }
}

impl<A> RetrieveSession<A> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn scope(&self) -> &RetrieveScope {
        &self.scope
    }

    pub fn server(&self) -> &DicomWebServerAlias {
        &self.server
    }

    /// Alias of the modality which instances are sent to.
    pub fn destination(&self) -> &ModalityAlias {
        &self.destination
    }

    /// Number of listed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Number of listed instances which were not transferred yet.
    pub fn remaining(&self) -> usize {
        self.instances.len() - self.cursor
    }

    /// Orthanc IDs of instances retrieved and not yet deleted.
    pub fn staged(&self) -> &[InstanceId] {
        &self.staged
    }
}

impl<A> Drop for RetrieveSession<A> {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            tracing::warn!(
                server = %self.server,
                count = self.staged.len(),
                "Retrieve session dropped without deleting its instances"
            );
        }
    }
}
