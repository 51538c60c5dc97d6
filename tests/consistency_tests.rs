use alcq_reasoner::{
    abox_consistent, abox_consistent_with_t, parse_abox, parse_tbox, Concept, Individual,
};

#[test]
fn test_mother_example_is_consistent() {
    let tbox = parse_tbox(
        "Woman == (and Person Female)\n\
         Man == (and Person (not Female))\n\
         Mother == (and Woman (exists hasChild Person))",
    )
    .unwrap();
    let abox = parse_abox(
        "hasChild[mary, tom]\n\
         Woman[mary]\n\
         Person[tom]\n\
         Mother[mary]",
    )
    .unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(consistent);

    // Unfolding Woman[mary] must have derived both conjuncts
    let model = model.unwrap();
    let mary = Individual::named("mary");
    assert!(model.has_concept(&mary, &Concept::named("Female")));
    assert!(model.has_concept(&mary, &Concept::named("Person")));
}

#[test]
fn test_witness_extends_input_and_is_saturated() {
    let tbox = parse_tbox("Mother == (and Woman (exists hasChild Person))").unwrap();
    let abox = parse_abox("Mother[mary]").unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(consistent);

    let model = model.unwrap();
    assert!(model.contains_all(&abox));

    // Closed under the rules: re-running the engine adds nothing
    let (again, saturated_twice) = abox_consistent(&model, &tbox).unwrap();
    assert!(again);
    assert_eq!(
        saturated_twice.unwrap().assertion_count(),
        model.assertion_count()
    );
}

#[test]
fn test_direct_contradiction_is_inconsistent() {
    let tbox = parse_tbox("").unwrap();
    let abox = parse_abox(
        "Person[tom]\n\
         (not Person)[tom]",
    )
    .unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(!consistent);
    assert!(model.is_none());
}

#[test]
fn test_contradiction_through_definitions() {
    let tbox = parse_tbox(
        "Woman == (and Person Female)\n\
         Man == (and Person (not Female))",
    )
    .unwrap();
    let abox = parse_abox(
        "Woman[alex]\n\
         Man[alex]",
    )
    .unwrap();

    let (consistent, _) = abox_consistent(&abox, &tbox).unwrap();
    assert!(!consistent);
}

#[test]
fn test_disjunction_backtracks_to_consistent_branch() {
    let tbox = parse_tbox("").unwrap();
    let abox = parse_abox(
        "(or Smart Studious)[eva]\n\
         (not Smart)[eva]",
    )
    .unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(consistent);
    assert!(model
        .unwrap()
        .has_concept(&Individual::named("eva"), &Concept::named("Studious")));
}

#[test]
fn test_universal_propagates_to_all_successors() {
    let tbox = parse_tbox("").unwrap();
    let abox = parse_abox(
        "attendedBy[course, ann]\n\
         attendedBy[course, joe]\n\
         (all attendedBy Student)[course]",
    )
    .unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(consistent);
    let model = model.unwrap();
    assert!(model.has_concept(&Individual::named("ann"), &Concept::named("Student")));
    assert!(model.has_concept(&Individual::named("joe"), &Concept::named("Student")));
}

#[test]
fn test_cyclic_tbox_terminates_by_blocking() {
    let tbox = parse_tbox("Person == (and Human (exists hasParent Person))").unwrap();
    let abox = parse_abox("Person[tom]").unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(consistent);

    // The hasParent chain must stop at a blocked anonymous individual
    // instead of unrolling forever
    let model = model.unwrap();
    assert!(model.individual_count() <= 3);
}

#[test]
fn test_existential_reuses_existing_successor() {
    let tbox = parse_tbox("").unwrap();
    let abox = parse_abox(
        "hasChild[mary, tom]\n\
         Person[tom]\n\
         (exists hasChild Person)[mary]",
    )
    .unwrap();

    let (consistent, model) = abox_consistent(&abox, &tbox).unwrap();
    assert!(consistent);
    // tom already witnesses the restriction; no anonymous individual needed
    assert_eq!(model.unwrap().individual_count(), 2);
}

#[test]
fn test_with_t_produces_total_models() {
    let tbox = parse_tbox("GoodStudent == (or Smart Studious)").unwrap();
    let abox = parse_abox("GoodStudent[eva]").unwrap();

    let (consistent, models) = abox_consistent_with_t(&abox, &tbox).unwrap();
    assert!(consistent);
    assert!(models.len() > 1);

    let eva = Individual::named("eva");
    for model in &models {
        for atom in ["GoodStudent", "Smart", "Studious"] {
            let positive = Concept::named(atom);
            let negative = positive.negation_nnf();
            assert!(
                model.has_concept(&eva, &positive) || model.has_concept(&eva, &negative),
                "{} undecided in a with_t model",
                atom
            );
        }
    }
}

#[test]
fn test_with_t_on_inconsistent_abox_returns_no_models() {
    let tbox = parse_tbox("").unwrap();
    let abox = parse_abox(
        "A[x]\n\
         (not A)[x]",
    )
    .unwrap();

    let (consistent, models) = abox_consistent_with_t(&abox, &tbox).unwrap();
    assert!(!consistent);
    assert!(models.is_empty());
}
