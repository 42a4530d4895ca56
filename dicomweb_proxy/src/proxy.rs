use crate::answer::flatten;
use crate::api::DicomWebClient;
use crate::config::ProxyConfig;
use crate::error::{ProxyError, ValidationError};
use crate::models::{FindQuery, FlatTagRecord, MoveRequest};
use crate::query::build_query;
use crate::rest::RestApi;
use crate::retrieve::RetrieveSession;
use orthanc_api::{DicomWebServerAlias, InstanceId};

/// Callbacks of a DICOM C-FIND SCP and C-MOVE SCP which are served by
/// DICOMweb servers configured in the Orthanc DICOMweb plugin.
///
/// The called AET of C-FIND and the source AET of C-MOVE are the aliases of
/// DICOMweb servers. Errors are written to the log before being returned.
#[derive(Clone)]
pub struct DicomWebProxy<A> {
    api: A,
    config: ProxyConfig,
}

impl<A: RestApi + Clone> DicomWebProxy<A> {
    pub fn new(api: A, config: ProxyConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Answer a C-FIND using QIDO-RS.
    pub fn on_find(
        &self,
        called_aet: &str,
        query: &FindQuery,
    ) -> Result<Vec<FlatTagRecord>, ProxyError> {
        self.find(called_aet, query).inspect_err(ProxyError::trace)
    }

    fn find(&self, called_aet: &str, query: &FindQuery) -> Result<Vec<FlatTagRecord>, ProxyError> {
        let called_aet = called_aet.trim();
        if called_aet.is_empty() {
            return Err(ValidationError::MissingField("CalledAET").into());
        }
        let server = DicomWebServerAlias::new(called_aet);
        let rest_query = build_query(query);
        tracing::debug!(
            server = %server,
            resource = rest_query.resource.as_str(),
            arguments = ?rest_query.arguments,
            "QIDO-RS"
        );
        let records = DicomWebClient::new(self.api.clone()).get(&server, &rest_query.into())?;
        let answers = records
            .iter()
            .map(flatten)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(server = %server, count = answers.len(), "C-FIND");
        Ok(answers)
    }

    /// Start a C-MOVE.
    pub fn create_move(&self, request: &MoveRequest) -> Result<RetrieveSession<A>, ProxyError> {
        RetrieveSession::open(self.api.clone(), request, &self.config)
            .inspect_err(ProxyError::trace)
    }

    /// Number of C-STORE sub-operations of a C-MOVE.
    pub fn get_move_size(&self, session: &mut RetrieveSession<A>) -> Result<usize, ProxyError> {
        session.list().inspect_err(ProxyError::trace)
    }

    /// Do one C-STORE sub-operation of a C-MOVE.
    pub fn apply_move(&self, session: &mut RetrieveSession<A>) -> Result<InstanceId, ProxyError> {
        session.advance().inspect_err(ProxyError::trace)
    }

    /// End a C-MOVE, successful or not.
    pub fn free_move(&self, mut session: RetrieveSession<A>) {
        if let Err(e) = session.release() {
            e.trace()
        }
    }

    /// Do a whole C-MOVE. Returns the number of instances sent.
    pub fn run_move(&self, request: &MoveRequest) -> Result<usize, ProxyError> {
        let mut session = self.create_move(request)?;
        let result = self.transfer_all(&mut session);
        self.free_move(session);
        result
    }

    fn transfer_all(&self, session: &mut RetrieveSession<A>) -> Result<usize, ProxyError> {
        let count = self.get_move_size(session)?;
        for _ in 0..count {
            self.apply_move(session)?;
        }
        Ok(count)
    }
}
