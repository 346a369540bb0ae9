mod registry;
mod release;
mod setup;

pub use registry::{
    AuthCheck, BootstrapOutcome, RcFile, RegistryAuthRequest, RegistryBootstrapper,
    auth_token_line, registry_host,
};
pub use release::{
    OUTPUT_HAS_CHANGESETS, OUTPUT_PUBLISHED, OUTPUT_PUBLISHED_PACKAGES,
    OUTPUT_PULL_REQUEST_NUMBER, ReleaseDecision, ReleaseInput, ReleaseOperation,
};
pub use setup::{SetupInput, SetupOperation};
