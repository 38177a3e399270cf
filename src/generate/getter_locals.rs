use tracing::debug;

use crate::generate::arguments::ArgumentResolver;
use crate::generate::declaration::{Declaration, Expression, Modifiers};
use crate::generate::names::getter_local_name;
use crate::generate::session::GenerateSession;
use crate::model::candidate::CandidateValue;
use crate::model::index::TypeIndex;

/// Build one local-variable declaration per accessor of the selected owner:
/// public, non-static, non-void methods whose name yields a usable local
/// name. Each initializer is `owner.method(args…)` with arguments resolved
/// against the session's candidate pool.
pub fn synthesize_getter_locals(
    session: &mut GenerateSession,
    owner: &CandidateValue,
    index: &TypeIndex,
) -> Vec<Declaration> {
    let methods = index.methods_of(&owner.ty);
    debug!(
        owner = owner.name.as_ref(),
        owner_type = owner.ty.as_str(),
        methods = methods.len(),
        "synthesizing getter invocations"
    );

    let mut declarations = Vec::new();
    for method in methods {
        if !method.is_public || method.is_static || method.return_type.is_void() {
            continue;
        }
        let base_name = match getter_local_name(&method.name) {
            Some(n) => n,
            None => continue,
        };
        let args: Vec<Expression> = {
            let resolver = ArgumentResolver::new(&session.pool, index);
            method
                .params
                .iter()
                .map(|p| resolver.resolve(&p.ty, Some(&p.name)))
                .collect()
        };
        let name = session.registry.fresh_name(&base_name);
        declarations.push(Declaration {
            modifiers: Modifiers::none(),
            ty: method.return_type.clone(),
            name,
            init: Some(Expression::GetterCall {
                owner: owner.name.clone(),
                method: method.name.clone(),
                args,
            }),
        });
    }
    declarations
}
