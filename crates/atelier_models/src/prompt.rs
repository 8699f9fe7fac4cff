//! Prompt composition for direct provider backends.

use atelier_core::{BackendRequest, ComponentLibrary, Framework, VisualStyle};

/// Render the structural preferences into a system prompt for the provider.
///
/// The output is deterministic for a given request so prompt-level caching
/// on the provider side stays effective.
pub fn build_system_prompt(req: &BackendRequest) -> String {
    let language = if req.typescript {
        "TypeScript"
    } else {
        "JavaScript"
    };

    let framework_guidance = match req.framework {
        Framework::React => "a React function component using JSX",
        Framework::Vue => "a Vue 3 single-file component using the composition API",
        Framework::Angular => "an Angular standalone component",
        Framework::Svelte => "a Svelte component",
    };

    let library_guidance = match req.component_library {
        ComponentLibrary::None => "Style with plain utility classes; do not pull in a component library.",
        ComponentLibrary::Tailwind => "Style exclusively with Tailwind CSS utility classes.",
        ComponentLibrary::Mui => "Build on Material UI (MUI) components.",
        ComponentLibrary::Chakra => "Build on Chakra UI components.",
        ComponentLibrary::Shadcn => "Build on shadcn/ui primitives.",
    };

    let style_guidance = match req.style {
        VisualStyle::Modern => "Aim for a modern look: generous spacing, soft shadows, rounded corners.",
        VisualStyle::Minimal => "Aim for a minimal look: sparse, typography-led, little chrome.",
        VisualStyle::Playful => "Aim for a playful look: bold colors and subtle motion.",
        VisualStyle::Corporate => "Aim for a corporate look: conservative, dense, enterprise-friendly.",
    };

    format!(
        "You are an expert UI engineer. Generate {framework_guidance} in {language}.\n\
         {library_guidance}\n\
         {style_guidance}\n\
         Make the component accessible (labels, alt text, natural tab order) and \
         responsive (breakpoint-aware layout).\n\
         Respond with the component source code only, no surrounding prose."
    )
}

/// The user-facing task text: the prompt plus any enrichment context.
pub fn build_user_text(req: &BackendRequest) -> String {
    req.task_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::GenerationRequest;

    fn request(framework: Framework, library: ComponentLibrary) -> BackendRequest {
        let request = GenerationRequest {
            prompt: "Create a modern button component".to_string(),
            framework,
            component_library: library,
            style: VisualStyle::Minimal,
            typescript: true,
            api_key: None,
            use_context: true,
            image: None,
            parent_generation_id: None,
        };
        BackendRequest::from_request(&request, None)
    }

    #[test]
    fn system_prompt_reflects_preferences() {
        let prompt = build_system_prompt(&request(Framework::React, ComponentLibrary::Tailwind));
        assert!(prompt.contains("React function component"));
        assert!(prompt.contains("TypeScript"));
        assert!(prompt.contains("Tailwind CSS"));
        assert!(prompt.contains("minimal look"));
    }

    #[test]
    fn javascript_when_typescript_disabled() {
        let mut req = request(Framework::Vue, ComponentLibrary::None);
        req.typescript = false;
        let prompt = build_system_prompt(&req);
        assert!(prompt.contains("JavaScript"));
        assert!(prompt.contains("Vue 3"));
    }

    #[test]
    fn user_text_appends_context_when_present() {
        let mut req = request(Framework::React, ComponentLibrary::Tailwind);
        req.context_addition = Some("Exemplars follow".to_string());
        let text = build_user_text(&req);
        assert!(text.starts_with("Create a modern button component"));
        assert!(text.ends_with("Exemplars follow"));
    }
}
