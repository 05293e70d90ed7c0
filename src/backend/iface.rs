//! Per-component interface header.
//!
//! The header declares the `diag` enum of one component by including the generated `Diagnostic<C>Kinds.inc`,
//! `Diagnostic<C>Enums.inc` and `Diagnostic<C>CompatIDs.inc` files with suitable `DIAG*` macro definitions.

use crate::config::GenConfig;
use crate::error::GenError;

/// ## Errors
/// - No component is configured.
pub fn emit_iface(config: &GenConfig) -> Result<String, GenError> {
    let component = config.component_filter().ok_or(GenError::MissingComponent)?;
    let upper = component.to_uppercase();
    Ok(format!(
        r#"
namespace clang {{
namespace diag {{
enum {{
#define DIAG(ENUM, FLAGS, DEFAULT_MAPPING, DESC, GROUP, SFINAE, NOWERROR,      \
             SHOWINSYSHEADER, SHOWINSYSMACRO, DEFERRABLE, CATEGORY)            \
  ENUM,
#define {upper}START
#include "clang/Basic/Diagnostic{component}Kinds.inc"
#undef DIAG
  NUM_BUILTIN_{upper}_DIAGNOSTICS
}};

#define DIAG_ENUM(ENUM_NAME)                                                   \
  namespace ENUM_NAME {{                                                        \
  enum {{
#define DIAG_ENUM_ITEM(IDX, NAME) NAME = IDX,
#define DIAG_ENUM_END()                                                        \
  }}                                                                            \
  ;                                                                            \
  }}
#include "clang/Basic/Diagnostic{component}Enums.inc"
#undef DIAG_ENUM_END
#undef DIAG_ENUM_ITEM
#undef DIAG_ENUM
}} // end namespace diag

namespace diag_compat {{
#define DIAG_COMPAT_IDS_BEGIN() enum {{
#define DIAG_COMPAT_IDS_END()                                                  \
  }}                                                                            \
  ;
#define DIAG_COMPAT_ID(IDX, NAME, ...) NAME = IDX,
#include "clang/Basic/Diagnostic{component}CompatIDs.inc"
#undef DIAG_COMPAT_ID
#undef DIAG_COMPAT_IDS_BEGIN
#undef DIAG_COMPAT_IDS_END
}} // end namespace diag_compat
}} // end namespace clang
"#
    ))
}
