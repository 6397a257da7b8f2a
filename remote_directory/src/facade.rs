//! Directory operations
//!
//! Each operation packs its arguments into the protocol request, calls the
//! matching method on the session's server-side service, and unpacks the
//! response. Entries, paths and locations pass through untouched.

use crate::{DirectoryError, Session};
use directory_proto::{
    method, DeleteRequest, DeleteResponse, GlobRequest, GlobResponse, LookupRequest,
    LookupResponse, MakeDirectoryRequest, MakeDirectoryResponse, PutRequest, PutResponse,
    WhichAccessRequest, WhichAccessResponse,
};
use directory_types::{DirEntry, Endpoint, Location, PathName};

/// A directory service: the name and metadata server of the store
pub trait Directory: Send + Sync {
    /// Returns every entry whose name matches `pattern`
    fn glob(&self, pattern: &str) -> Result<Vec<DirEntry>, DirectoryError>;

    /// Creates a directory and returns where it is stored
    fn make_directory(&self, name: &PathName) -> Result<Location, DirectoryError>;

    /// Stores an entry. Directories are created with `make_directory`.
    fn put(&self, entry: &DirEntry) -> Result<(), DirectoryError>;

    /// Returns the path of the Access file that controls `name`
    fn which_access(&self, name: &PathName) -> Result<PathName, DirectoryError>;

    fn delete(&self, name: &PathName) -> Result<(), DirectoryError>;

    fn lookup(&self, name: &PathName) -> Result<DirEntry, DirectoryError>;

    /// Returns the endpoint this directory was reached through
    fn endpoint(&self) -> Endpoint;

    /// Returns the authenticated identity of the server, if any
    fn server_user_name(&self) -> String;
}

impl Directory for Session {
    fn glob(&self, pattern: &str) -> Result<Vec<DirEntry>, DirectoryError> {
        let request = GlobRequest {
            pattern: pattern.to_string(),
        };
        let response: GlobResponse = self.call(method::GLOB, &request)?;
        Ok(response.entries)
    }

    fn make_directory(&self, name: &PathName) -> Result<Location, DirectoryError> {
        let request = MakeDirectoryRequest { name: name.clone() };
        let response: MakeDirectoryResponse = self.call(method::MAKE_DIRECTORY, &request)?;
        Ok(response.location)
    }

    fn put(&self, entry: &DirEntry) -> Result<(), DirectoryError> {
        let request = PutRequest {
            entry: entry.clone(),
        };
        let _: PutResponse = self.call(method::PUT, &request)?;
        Ok(())
    }

    fn which_access(&self, name: &PathName) -> Result<PathName, DirectoryError> {
        let request = WhichAccessRequest { name: name.clone() };
        let response: WhichAccessResponse = self.call(method::WHICH_ACCESS, &request)?;
        Ok(response.name)
    }

    fn delete(&self, name: &PathName) -> Result<(), DirectoryError> {
        let request = DeleteRequest { name: name.clone() };
        let _: DeleteResponse = self.call(method::DELETE, &request)?;
        Ok(())
    }

    fn lookup(&self, name: &PathName) -> Result<DirEntry, DirectoryError> {
        let request = LookupRequest { name: name.clone() };
        let response: LookupResponse = self.call(method::LOOKUP, &request)?;
        Ok(response.entry)
    }

    fn endpoint(&self) -> Endpoint {
        self.endpoint_ref().clone()
    }

    // No server identity is authenticated yet.
    fn server_user_name(&self) -> String {
        String::new()
    }
}
