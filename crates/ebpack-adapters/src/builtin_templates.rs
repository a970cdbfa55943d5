//! Dockerfile templates that ship with ebpack.
//!
//! Templates use the placeholder syntax of
//! [`ebpack_core::domain::DescriptorTemplate`]: `{name}` is substituted,
//! `{{` and `}}` are literal braces.
//!
//! The OS dependency loop ends every install with `|| true`. A dependency
//! that fails to install does not fail the image build; the image may then
//! lack a library, and the `eb` step is where that surfaces.

use ebpack_core::{application::ApplicationError, domain::DockerfileTemplate, error::EbpackResult};

/// Name of the template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "ubuntu-16.04";

/// Names accepted by [`by_name`].
pub const TEMPLATE_NAMES: [&str; 1] = [DEFAULT_TEMPLATE];

const DOCKERFILE_UBUNTU_1604: &str = r#"FROM ubuntu:16.04
LABEL org.easybuild.packaging="docker"

RUN apt-get update && \
    apt-get install -y python python-pip lmod curl wget

RUN pip install -U pip setuptools && \
    pip install easybuild=={easybuild_version}

RUN mkdir /app && \
    mkdir /scratch && \
    mkdir /scratch/tmp && \
    useradd -m -s /bin/bash easybuild && \
    chown easybuild:easybuild -R /app && \
    chown easybuild:easybuild -R /scratch

RUN OS_DEPS='{os_deps}' && \
    for dep in ${{OS_DEPS}}; do apt-get -qq install ${{dep}} || true; done

USER easybuild

RUN set -x &&  \
    . /usr/share/lmod/lmod/init/sh && \
    eb {easybuild_filename} --robot --installpath=/app/ --prefix=/scratch --tmpdir=/scratch/tmp

RUN touch ${{HOME}}/.profile && \
    echo '\n# Added by easybuild docker packaging' >> ${{HOME}}/.profile && \
    echo 'source /usr/share/lmod/lmod/init/bash' >> ${{HOME}}/.profile && \
    echo 'module use {init_modulepaths}' >> ${{HOME}}/.profile && \
    echo 'module load {modules}' >> ${{HOME}}/.profile
"#;

/// Ubuntu 16.04 image with Lmod and a pip-installed EasyBuild.
pub fn ubuntu_1604() -> EbpackResult<DockerfileTemplate> {
    Ok(DockerfileTemplate::parse(
        DEFAULT_TEMPLATE,
        DOCKERFILE_UBUNTU_1604,
    )?)
}

/// Look up a builtin template by name.
pub fn by_name(name: &str) -> EbpackResult<DockerfileTemplate> {
    match name {
        DEFAULT_TEMPLATE => ubuntu_1604(),
        _ => Err(ApplicationError::UnknownTemplate {
            name: name.to_string(),
            known: TEMPLATE_NAMES.join(", "),
        }
        .into()),
    }
}
